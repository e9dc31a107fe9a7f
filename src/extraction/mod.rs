/*!
 * Transcript content extraction.
 *
 * Reduces a slide transcript to the text that matters for exercise
 * authoring:
 * - `classifier`: Detects whether the input is a structured transcript
 * - `sections`: Splits slides and pulls titles, narration and part content
 * - `cleaners`: Cleans narration, part content (code kept verbatim) and plain text
 * - `patterns`: Compiled patterns for the transcript dialect
 * - `summary`: Before/after statistics
 *
 * Extraction never fails. Input that is not a transcript, or a transcript
 * that yields nothing, comes back whitespace-normalised instead.
 */

use log::debug;

pub mod classifier;
pub mod cleaners;
pub mod patterns;
pub mod sections;
pub mod summary;

pub use classifier::{StructureIndicators, has_structure};
pub use cleaners::{clean_part, clean_plain, clean_script};
pub use sections::{ExtractedBlock, extract_section, split_sections};
pub use summary::{ContentSummary, summarize};

/// Extract titles, narration and slide content from a raw transcript
///
/// CRLF line endings are normalised to LF first, so the output always uses LF.
pub fn extract_meaningful_content(raw_text: &str) -> String {
    let normalized = raw_text.replace("\r\n", "\n");
    let raw_text = normalized.as_str();

    let indicators = StructureIndicators::detect(raw_text);
    if !indicators.is_structured() {
        debug!(
            "Treating input as plain text ({} structural indicator(s))",
            indicators.count()
        );
        return clean_plain(raw_text);
    }

    let sections = split_sections(raw_text);
    let extracted: Vec<String> = sections
        .iter()
        .map(|section| extract_section(section))
        .filter(|content| !content.trim().is_empty())
        .collect();

    debug!(
        "Extracted content from {} of {} section(s)",
        extracted.len(),
        sections.len()
    );

    if extracted.is_empty() {
        debug!("Structured extraction produced nothing, falling back to plain text");
        return clean_plain(raw_text);
    }

    extracted.join("\n\n")
}
