/*!
 * Integration tests for JSON generation with retries against the mock provider
 */

use lectern::app_config::GenerationConfig;
use lectern::errors::{GenerationError, ProviderError};
use lectern::providers::Provider;
use lectern::providers::mock::{MockProvider, MockReply};
use lectern::{RetryPolicy, generate_json};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::Instant;
use crate::common;

#[derive(Debug, Deserialize, PartialEq)]
struct CodingExercise {
    title: String,
    solution: String,
}

const VALID_REPLY: &str =
    "Here's the JSON: ```json\n{\"title\": \"Filter rows\", \"solution\": \"df[df.x > 1]\"}\n```";

/// Test that a malformed first reply is retried after one backoff unit
#[tokio::test(start_paused = true)]
async fn test_generateJson_withMalformedThenValidReply_shouldSucceedOnSecondAttempt() {
    common::init_logging();

    let provider = MockProvider::scripted(vec![
        MockReply::Text("Sorry, I cannot {produce".to_string()),
        MockReply::Text(
            "{\"title\": \"Filter rows\", \"solution\": \"df[df.x > 1]\"}".to_string(),
        ),
    ]);
    let policy = RetryPolicy::new(3, Duration::from_secs(1));
    let started = Instant::now();

    let exercise: CodingExercise = generate_json("coding exercise", &policy, &provider, "prompt")
        .await
        .expect("second reply should parse");

    assert_eq!(exercise.title, "Filter rows");
    assert_eq!(provider.request_count(), 2);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(1) && elapsed < Duration::from_secs(2));
}

/// Test that a reply wrapped in a prefix and fence parses on the first attempt
#[tokio::test(start_paused = true)]
async fn test_generateJson_withWrappedReply_shouldNotRetry() {
    let provider = MockProvider::replying(VALID_REPLY);
    let policy = RetryPolicy::default();

    let exercise: CodingExercise = generate_json("coding exercise", &policy, &provider, "prompt")
        .await
        .expect("wrapped reply should parse");

    assert_eq!(exercise.solution, "df[df.x > 1]");
    assert_eq!(provider.request_count(), 1);
}

/// Test that an authentication failure is returned without retrying
#[tokio::test(start_paused = true)]
async fn test_generateJson_withAuthFailure_shouldFailImmediately() {
    let provider = MockProvider::failing();
    let policy = RetryPolicy::default();
    let started = Instant::now();

    let result = generate_json::<CodingExercise, _>("coding exercise", &policy, &provider, "prompt").await;

    assert!(matches!(
        result,
        Err(GenerationError::Provider(ProviderError::AuthenticationError(_)))
    ));
    assert_eq!(provider.request_count(), 1);
    assert!(started.elapsed() < Duration::from_millis(1));
}

/// Test that persistent garbage exhausts the attempts with growing backoff
#[tokio::test(start_paused = true)]
async fn test_generateJson_withAlwaysMalformedReply_shouldExhaustRetries() {
    let provider = MockProvider::replying("I'd rather write prose than JSON.");
    let policy = RetryPolicy::from_config(&GenerationConfig::default());
    let started = Instant::now();

    let result = generate_json::<CodingExercise, _>("coding exercise", &policy, &provider, "prompt").await;

    match result {
        Err(GenerationError::RetriesExhausted { context, attempts, source }) => {
            assert_eq!(context, "coding exercise");
            assert_eq!(attempts, 3);
            assert!(matches!(*source, GenerationError::MalformedJson(_)));
        }
        other => panic!("expected exhausted retries, got {:?}", other),
    }
    assert_eq!(provider.request_count(), 3);

    // 1s after the first failure, 2s after the second, none after the last
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(3) && elapsed < Duration::from_secs(4));
}

/// Test that a server error from the provider is not retried either
#[tokio::test(start_paused = true)]
async fn test_generateJson_withServerError_shouldNotRetry() {
    let provider = MockProvider::scripted(vec![
        MockReply::ServerError,
        MockReply::Text(VALID_REPLY.to_string()),
    ]);
    let policy = RetryPolicy::default();

    let result = generate_json::<CodingExercise, _>("coding exercise", &policy, &provider, "prompt").await;

    assert!(matches!(
        result,
        Err(GenerationError::Provider(ProviderError::ApiError { status_code: 503, .. }))
    ));
    assert_eq!(provider.request_count(), 1);
}

/// Test that the provider can be driven through a trait object
#[tokio::test(start_paused = true)]
async fn test_generateJson_withDynProvider_shouldParseReply() {
    let provider: Box<dyn Provider> = Box::new(MockProvider::replying(VALID_REPLY));
    let policy = RetryPolicy::default();

    let exercise: CodingExercise = generate_json("coding exercise", &policy, provider.as_ref(), "prompt")
        .await
        .expect("reply should parse");

    assert_eq!(provider.name(), "mock");
    assert_eq!(exercise.title, "Filter rows");
}
