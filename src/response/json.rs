/*!
 * Recovery of a JSON object from a free-form model reply.
 *
 * Replies may be wrapped in a markdown fence, prefixed with a sentence of
 * commentary, or followed by trailing text. Cleaning is best effort and
 * never fails; parsing failures surface as `GenerationError` so callers
 * can retry.
 */

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::GenerationError;

/// Conversational prefixes stripped from the start of a reply
const REPLY_PREFIXES: &[&str] = &[
    "Here's the JSON:",
    "The JSON response is:",
    "Response:",
    "JSON:",
];

/// Markdown code fence
const FENCE: &str = "```";

/// Reduce a model reply to its first balanced JSON object.
///
/// When the reply holds no `{` at all the stripped text is returned as is.
/// When braces never balance, everything from the first `{` onward is
/// returned and the parse step reports the failure.
pub fn clean_json_response(raw_reply: &str) -> String {
    let unwrapped = strip_prefix(strip_fences(raw_reply.trim()));

    let Some(start) = unwrapped.find('{') else {
        debug!("No JSON object found in reply of {} chars", raw_reply.len());
        return unwrapped.to_string();
    };

    let candidate = &unwrapped[start..];
    match balanced_object_len(candidate) {
        Some(len) => candidate[..len].to_string(),
        None => {
            debug!("Unbalanced braces in reply, returning tail from first brace");
            candidate.to_string()
        }
    }
}

/// Clean a reply and deserialize it into `T`
pub fn parse_json_response<T: DeserializeOwned>(raw_reply: &str) -> Result<T, GenerationError> {
    let cleaned = clean_json_response(raw_reply);
    Ok(serde_json::from_str(&cleaned)?)
}

/// Check that a parsed reply is an object holding every required key
pub fn require_keys(value: &Value, keys: &[&str]) -> Result<(), GenerationError> {
    let object = value.as_object().ok_or_else(|| {
        GenerationError::InvalidValue(format!("expected a JSON object, found {}", kind_of(value)))
    })?;

    match keys.iter().find(|key| !object.contains_key(**key)) {
        Some(missing) => Err(GenerationError::MissingKey((*missing).to_string())),
        None => Ok(()),
    }
}

/// Remove one opening fence line and one closing fence, if present
fn strip_fences(text: &str) -> &str {
    let mut text = text;

    if text.starts_with(FENCE) {
        text = match text.find('\n') {
            Some(newline) => &text[newline + 1..],
            None => text
                .strip_prefix("```json")
                .or_else(|| text.strip_prefix(FENCE))
                .unwrap_or(text),
        };
    }

    if let Some(stripped) = text.trim_end().strip_suffix(FENCE) {
        text = stripped;
    }

    text.trim()
}

/// Remove at most one known conversational prefix
fn strip_prefix(text: &str) -> &str {
    REPLY_PREFIXES
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
        .map_or(text, str::trim_start)
}

/// Byte length of the object opening at the start of `text`, if it closes.
///
/// Braces inside string literals are ignored; a backslash suspends the
/// string toggle for the following character.
fn balanced_object_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + ch.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
