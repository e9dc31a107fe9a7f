/*!
 * Structure detection for slide transcripts.
 *
 * A document is treated as a structured transcript only when at least two
 * independent structural indicators are present. A single `---` or `##`
 * is common in ordinary markdown and is not enough on its own.
 */

use regex::Regex;

use super::patterns::{
    HEADING_LINE_REGEX, PART_TAG_REGEX, SCRIPT_MARKER_REGEX, SEPARATOR_LINE_REGEX,
    YAML_TYPE_FENCE_REGEX,
};

/// Minimum number of indicators for a document to count as structured
pub const MIN_STRUCTURE_INDICATORS: usize = 2;

/// Which structural indicators were found in a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureIndicators {
    /// A `@script` narration marker
    pub script_marker: bool,
    /// A level-2 heading line
    pub slide_title: bool,
    /// A YAML fence opening with `type:`
    pub yaml_type_fence: bool,
    /// A numbered `@partN` marker
    pub part_marker: bool,
    /// A standalone `---` line
    pub separator_line: bool,
}

impl StructureIndicators {
    /// Evaluate every indicator against the raw text
    pub fn detect(text: &str) -> Self {
        let found = |pattern: &Regex| pattern.is_match(text);

        Self {
            script_marker: found(&SCRIPT_MARKER_REGEX),
            slide_title: found(&HEADING_LINE_REGEX),
            yaml_type_fence: found(&YAML_TYPE_FENCE_REGEX),
            part_marker: found(&PART_TAG_REGEX),
            separator_line: found(&SEPARATOR_LINE_REGEX),
        }
    }

    /// Number of indicators present
    pub fn count(&self) -> usize {
        [
            self.script_marker,
            self.slide_title,
            self.yaml_type_fence,
            self.part_marker,
            self.separator_line,
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// Whether enough indicators are present to treat the text as a transcript
    pub fn is_structured(&self) -> bool {
        self.count() >= MIN_STRUCTURE_INDICATORS
    }
}

/// Check whether the text looks like a structured slide transcript
pub fn has_structure(text: &str) -> bool {
    StructureIndicators::detect(text).is_structured()
}
