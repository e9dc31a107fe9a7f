/*!
 * Text cleaners for narration, part content and plain prose.
 */

use super::patterns::{
    AMPERSAND_LINE_REGEX, BLANK_RUN_REGEX, CODE_BLOCK_REGEX, EMPTY_BULLET_REGEX,
    METADATA_PATTERNS, TRANSITION_TAG_REGEX,
};

/// Flatten a narration block to a single line.
///
/// Narration is spoken audio, so line structure carries no meaning and
/// every whitespace run becomes one space.
pub fn clean_script(text: &str) -> String {
    let without_tags = TRANSITION_TAG_REGEX.replace_all(text, "");

    without_tags.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean a per-part content block while keeping fenced code verbatim
pub fn clean_part(text: &str) -> String {
    let without_tags = TRANSITION_TAG_REGEX.replace_all(text, "");

    split_at_code(&without_tags)
        .iter()
        .filter_map(|segment| match segment {
            Segment::Code(code) => Some((*code).to_string()),
            Segment::Prose(prose) => {
                let cleaned = clean_prose(prose);
                (!cleaned.is_empty()).then_some(cleaned)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Minimal normalisation used for documents without transcript structure
pub fn clean_plain(text: &str) -> String {
    BLANK_RUN_REGEX.replace_all(text, "\n\n").trim().to_string()
}

/// Whether a line survives the noise filter in part content
fn is_meaningful_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.chars().count() > 1 && !AMPERSAND_LINE_REGEX.is_match(trimmed)
}

/// Strip metadata and noise lines from text that holds no fenced code
fn clean_prose(text: &str) -> String {
    let mut content = text.to_string();
    for pattern in METADATA_PATTERNS.iter() {
        content = pattern.replace_all(&content, "${end}").into_owned();
    }

    content = EMPTY_BULLET_REGEX.replace_all(&content, "").into_owned();
    content = BLANK_RUN_REGEX.replace_all(&content, "\n\n").into_owned();

    content
        .lines()
        .map(str::trim_end)
        .filter(|line| is_meaningful_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A stretch of part content: either prose or one fenced code block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Prose(&'a str),
    Code(&'a str),
}

/// Cut part content at fenced code blocks, keeping document order.
///
/// Code never passes through a prose rewrite; there are no placeholder
/// tokens to restore.
fn split_at_code(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for block in CODE_BLOCK_REGEX.find_iter(text) {
        if block.start() > last {
            segments.push(Segment::Prose(&text[last..block.start()]));
        }
        segments.push(Segment::Code(block.as_str()));
        last = block.end();
    }

    if last < text.len() {
        segments.push(Segment::Prose(&text[last..]));
    }

    segments
}
