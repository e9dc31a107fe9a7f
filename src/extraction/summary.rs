/*!
 * Statistics comparing a raw transcript with its extracted content.
 */

use serde::{Deserialize, Serialize};

use super::classifier::has_structure;
use super::extract_meaningful_content;

/// Size comparison between a raw document and what extraction kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSummary {
    /// Characters in the raw document
    pub original_chars: usize,
    /// Characters in the extracted content
    pub extracted_chars: usize,
    /// Share of characters removed, in percent, one decimal place
    pub reduction_percentage: f64,
    /// Lines in the raw document
    pub original_lines: usize,
    /// Lines in the extracted content
    pub extracted_lines: usize,
    /// Whether the document was treated as a structured transcript
    pub structured: bool,
}

impl ContentSummary {
    /// Build a summary from a raw document and its extracted form
    pub fn compare(original: &str, extracted: &str) -> Self {
        let original_chars = original.chars().count();
        let extracted_chars = extracted.chars().count();

        let reduction_percentage = if original_chars == 0 {
            0.0
        } else {
            let ratio = 1.0 - extracted_chars as f64 / original_chars as f64;
            (ratio * 1000.0).round() / 10.0
        };

        Self {
            original_chars,
            extracted_chars,
            reduction_percentage,
            original_lines: original.split('\n').count(),
            extracted_lines: extracted.split('\n').count(),
            structured: has_structure(original),
        }
    }
}

/// Extract a document and report how much of it was kept
pub fn summarize(raw: &str) -> ContentSummary {
    let extracted = extract_meaningful_content(raw);
    ContentSummary::compare(raw, &extracted)
}
