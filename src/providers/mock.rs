/*!
 * Mock provider for exercising the generation path without a network.
 *
 * - `MockProvider::replying()` - Always returns the same reply
 * - `MockProvider::scripted()` - Returns replies in order, repeating the last
 * - `MockProvider::failing()` - Always fails with an authentication error
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// One canned outcome of a mock request
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Reply with this text
    Text(String),
    /// Fail as if the API key were rejected
    AuthFailure,
    /// Fail as if the server returned a 5xx status
    ServerError,
}

/// Mock provider returning scripted replies
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Replies served in order; the last one repeats
    replies: Vec<MockReply>,
    /// Requests served so far, shared between clones
    request_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a provider serving `replies` in order
    pub fn scripted(replies: Vec<MockReply>) -> Self {
        Self {
            replies,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a provider that always returns `text`
    pub fn replying(text: &str) -> Self {
        Self::scripted(vec![MockReply::Text(text.to_string())])
    }

    /// Create a provider that always fails with an authentication error
    pub fn failing() -> Self {
        Self::scripted(vec![MockReply::AuthFailure])
    }

    /// Number of requests served so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        let Some(last) = self.replies.len().checked_sub(1) else {
            return Ok(String::new());
        };

        match &self.replies[count.min(last)] {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::AuthFailure => Err(ProviderError::AuthenticationError(
                "Simulated invalid API key".to_string(),
            )),
            MockReply::ServerError => Err(ProviderError::ApiError {
                status_code: 503,
                message: format!("Simulated server failure (request #{})", count + 1),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
