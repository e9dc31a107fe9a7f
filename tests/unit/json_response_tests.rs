/*!
 * Tests for recovering JSON objects from model replies
 */

use lectern::GenerationError;
use lectern::clean_json_response;
use lectern::response::{parse_json_response, require_keys};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize, PartialEq)]
struct Exercise {
    title: String,
    difficulty: u8,
}

/// Test that a fenced reply with commentary around it yields the bare object
#[test]
fn test_cleanJsonResponse_withFenceAndChatter_shouldReturnObject() {
    let reply = "```json\n{\"title\": \"Joins\", \"difficulty\": 2}\n```";
    assert_eq!(clean_json_response(reply), "{\"title\": \"Joins\", \"difficulty\": 2}");
}

/// Test that a known prefix and trailing remarks are dropped
#[test]
fn test_cleanJsonResponse_withPrefixAndTrailer_shouldReturnObject() {
    let reply = "Here's the JSON: {\"a\": {\"b\": 1}} Let me know if you need changes.";
    assert_eq!(clean_json_response(reply), "{\"a\": {\"b\": 1}}");
}

/// Test that braces inside strings do not end the object early
#[test]
fn test_cleanJsonResponse_withBracesInString_shouldKeepWholeObject() {
    let reply = r#"{"code": "def f(): return {\"k\": \"}\"}", "n": 1} trailing"#;
    let cleaned = clean_json_response(reply);

    let value: Value = serde_json::from_str(&cleaned).expect("cleaned reply should parse");
    assert_eq!(value["n"], 1);
    assert_eq!(value["code"], "def f(): return {\"k\": \"}\"}");
}

/// Test that only the first of several objects is kept
#[test]
fn test_cleanJsonResponse_withTwoObjects_shouldKeepFirst() {
    assert_eq!(clean_json_response("{\"a\": 1}\n{\"b\": 2}"), "{\"a\": 1}");
}

/// Test that a reply without an object comes back stripped
#[test]
fn test_cleanJsonResponse_withoutBrace_shouldReturnStrippedText() {
    assert_eq!(clean_json_response("  JSON: not available  "), "not available");
}

/// Test that a truncated reply is returned from its first brace
#[test]
fn test_cleanJsonResponse_withUnbalancedBraces_shouldReturnTail() {
    assert_eq!(clean_json_response("Sure {\"a\": {\"b\": 1}"), "{\"a\": {\"b\": 1}");
}

/// Test that a valid reply deserializes into a typed value
#[test]
fn test_parseJsonResponse_withValidReply_shouldDeserialize() {
    let reply = "Response: {\"title\": \"Grouping\", \"difficulty\": 3}";
    let exercise: Exercise = parse_json_response(reply).expect("reply should parse");
    assert_eq!(
        exercise,
        Exercise {
            title: "Grouping".to_string(),
            difficulty: 3
        }
    );
}

/// Test that a truncated reply is reported as malformed and recoverable
#[test]
fn test_parseJsonResponse_withTruncatedReply_shouldBeRecoverableError() {
    let result = parse_json_response::<Value>("{\"title\": \"Grou");
    let error = result.expect_err("truncated reply should not parse");

    assert!(matches!(error, GenerationError::MalformedJson(_)));
    assert!(error.is_recoverable());
}

/// Test that required keys are checked on parsed replies
#[test]
fn test_requireKeys_withMissingKey_shouldNameIt() {
    let value = json!({"title": "Joins"});

    assert!(require_keys(&value, &["title"]).is_ok());
    match require_keys(&value, &["title", "solution"]) {
        Err(GenerationError::MissingKey(key)) => assert_eq!(key, "solution"),
        other => panic!("expected missing key error, got {:?}", other),
    }
}

/// Test that a non-object reply fails validation
#[test]
fn test_requireKeys_withArray_shouldBeInvalidValue() {
    let result = require_keys(&json!([1, 2]), &["title"]);
    assert!(matches!(result, Err(GenerationError::InvalidValue(_))));
}
