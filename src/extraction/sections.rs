/*!
 * Section splitting and per-section content extraction.
 */

use super::cleaners::{clean_part, clean_script};
use super::patterns::{
    FRONTMATTER_REGEX, PART_MARKER_REGEX, PART_TERMINATORS, SCRIPT_MARKER_REGEX,
    SCRIPT_TERMINATORS, SEPARATOR_REGEX, SLIDE_TITLE_REGEX, TerminatedBlocks, YAML_BLOCK_REGEX,
};

/// A piece of content pulled out of one slide section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedBlock {
    /// Slide title from a level-2 heading
    Title(String),
    /// Spoken narration for the slide
    Narration(String),
    /// On-slide content for one numbered part
    PartContent(String),
}

impl ExtractedBlock {
    /// Render the block, or `None` when cleaning leaves nothing
    pub fn render(&self) -> Option<String> {
        let rendered = match self {
            ExtractedBlock::Title(title) => format!("# {}", title.trim()),
            ExtractedBlock::Narration(raw) => clean_script(raw.trim()),
            ExtractedBlock::PartContent(raw) => clean_part(raw.trim()),
        };

        if rendered.trim().is_empty() {
            None
        } else {
            Some(rendered)
        }
    }
}

/// Split a document into trimmed, non-empty slide sections in document order
pub fn split_sections(text: &str) -> Vec<String> {
    let body = FRONTMATTER_REGEX.replacen(text, 1, "");

    SEPARATOR_REGEX
        .split(&body)
        .map(str::trim)
        .filter(|section| !section.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collect the raw blocks of a section: title, then narration, then parts
pub fn section_blocks(section: &str) -> Vec<ExtractedBlock> {
    let mut blocks = Vec::new();

    if let Some(caps) = SLIDE_TITLE_REGEX.captures(section) {
        blocks.push(ExtractedBlock::Title(caps[1].to_string()));
    }

    // YAML metadata must be gone before narration and parts are located
    let without_yaml = YAML_BLOCK_REGEX.replace_all(section, "");

    blocks.extend(
        TerminatedBlocks::new(&without_yaml, &SCRIPT_MARKER_REGEX, SCRIPT_TERMINATORS)
            .map(|body| ExtractedBlock::Narration(body.to_string())),
    );
    blocks.extend(
        TerminatedBlocks::new(&without_yaml, &PART_MARKER_REGEX, PART_TERMINATORS)
            .map(|body| ExtractedBlock::PartContent(body.to_string())),
    );

    blocks
}

/// Extract the meaningful content of one section, possibly empty
pub fn extract_section(section: &str) -> String {
    section_blocks(section)
        .iter()
        .filter_map(ExtractedBlock::render)
        .collect::<Vec<_>>()
        .join("\n\n")
}
