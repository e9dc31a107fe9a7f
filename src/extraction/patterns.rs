/*!
 * Compiled patterns for the slide transcript dialect.
 *
 * The `regex` crate has no lookaround, so block terminators are either
 * located by hand (see `TerminatedBlocks`) or captured and written back
 * during replacement.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading frontmatter block, anchored to the start of the document
pub static FRONTMATTER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A---\s*\n(?s:.*?)\n---\s*\n").expect("Invalid frontmatter regex")
});

/// Slide separator used to split a document into sections, LF or CRLF
pub static SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r?\n---\r?\n").expect("Invalid separator regex")
});

/// Standalone separator line anywhere in the text, LF or CRLF
pub static SEPARATOR_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^---\r?$").expect("Invalid separator line regex")
});

/// Narration block marker
pub static SCRIPT_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"`@script`\s*\n").expect("Invalid script marker regex")
});

/// Numbered per-part block marker, including its trailing line break
pub static PART_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"`@part\d+`\s*\n").expect("Invalid part marker regex")
});

/// Bare per-part marker, used for classification only
pub static PART_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"`@part\d+`").expect("Invalid part tag regex")
});

/// Level-2 heading used as a slide title
pub static SLIDE_TITLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^## (.+?)$").expect("Invalid slide title regex")
});

/// Any level-2 heading line, used for classification only
pub static HEADING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^## ").expect("Invalid heading line regex")
});

/// Fenced YAML metadata block
pub static YAML_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```yaml\s*\n(?s:.*?)\n```").expect("Invalid yaml block regex")
});

/// YAML fence whose first field is a `type:` declaration
pub static YAML_TYPE_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```yaml\s*\ntype:").expect("Invalid yaml type fence regex")
});

/// Transition index tags such as `{{1}}`
pub static TRANSITION_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\d+\}\}").expect("Invalid transition tag regex")
});

/// Fenced code block with any language tag, fences included
pub static CODE_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^[ \t]*```[^\n]*\n.*?^[ \t]*```").expect("Invalid code block regex")
});

/// Line holding nothing but a bullet marker
pub static EMPTY_BULLET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*-[ \t]*$").expect("Invalid empty bullet regex")
});

/// Three or more consecutive line breaks, i.e. two or more blank lines.
///
/// Whitespace-only lines count as blank. Each run collapses to a single
/// blank line.
pub static BLANK_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n\s*\n").expect("Invalid blank run regex")
});

/// Lines made only of whitespace and `&`
pub static AMPERSAND_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[&\s]*$").expect("Invalid ampersand line regex")
});

/// Metadata fields stripped from part content.
///
/// Single-line fields never cross a line break; an empty value strips the
/// bare field name. Patterns with an `end` group stop at a terminator that
/// is written back by the replacement, which stands in for a lookahead.
/// They run on prose only, never on fenced code.
pub static METADATA_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"`@lower_third`(?s:.*?)(?P<end>\n\n|\n`@|\z)",
        r"(?m)key:[ \t]*(?:[a-f0-9]+|$)",
        r"(?m)type:[ \t]*(?:\w+|$)",
        r"(?m)disable_transition:[ \t]*(?:\w+|$)",
        r"(?m)hide_title:[ \t]*(?:\w+|$)",
        r"(?m)code_zoom:[ \t]*(?:\d+|$)",
        r"video_link:(?s:.*?)(?P<end>\n\n|\n---|\z)",
        r"mp3:[ \t]*>-(?s:.*?)(?P<end>\n\n|\n---|\z)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid metadata regex"))
    .collect()
});

/// Terminators for a narration block
pub const SCRIPT_TERMINATORS: &[&str] = &["\n\n---"];

/// Terminators for a per-part block
pub const PART_TERMINATORS: &[&str] = &["`@", "\n\n---"];

/// Iterator over the bodies that follow each marker match, each running up
/// to the nearest terminator or the end of the text.
///
/// Scanning resumes at the terminator, so a marker that doubles as a
/// terminator still opens the next block.
pub struct TerminatedBlocks<'a> {
    text: &'a str,
    marker: &'a Regex,
    terminators: &'a [&'a str],
    position: usize,
}

impl<'a> TerminatedBlocks<'a> {
    pub fn new(text: &'a str, marker: &'a Regex, terminators: &'a [&'a str]) -> Self {
        Self {
            text,
            marker,
            terminators,
            position: 0,
        }
    }
}

impl<'a> Iterator for TerminatedBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let found = self.marker.find_at(self.text, self.position)?;
        let body_start = found.end();
        let rest = &self.text[body_start..];

        let body_end = self
            .terminators
            .iter()
            .filter_map(|terminator| rest.find(terminator))
            .min()
            .map_or(self.text.len(), |offset| body_start + offset);

        self.position = body_end;

        Some(&self.text[body_start..body_end])
    }
}
