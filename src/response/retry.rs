/*!
 * Bounded retry with exponential backoff for generation attempts.
 *
 * Only recoverable errors (malformed JSON, missing keys, failed value
 * checks) are retried. Provider faults such as bad credentials are
 * returned on first sight. The backoff is an async sleep, so dropping the
 * returned future cancels a pending retry.
 */

use std::future::Future;
use std::time::Duration;

use log::{error, info, warn};
use serde::de::DeserializeOwned;

use crate::app_config::GenerationConfig;
use crate::errors::GenerationError;
use crate::providers::Provider;
use crate::response::json::parse_json_response;

/// Default number of attempts per unit of work
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default backoff unit
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// How many times to attempt a unit of work and how long to wait between tries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Backoff unit; the wait after failed attempt `n` is `base_delay * 2^n`
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given attempt count and backoff unit
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Build the policy described by the generation settings
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.retry_backoff_ms),
        )
    }

    /// Attempts actually made; zero is treated as one
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Wait after the failed attempt with zero-based index `attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Run `attempt` until it succeeds, fails unrecoverably, or the policy is spent.
///
/// `context` names what is being generated and is carried by the
/// `RetriesExhausted` error.
pub async fn generate_with_retry<T, F, Fut>(
    context: &str,
    policy: &RetryPolicy,
    mut attempt: F,
) -> Result<T, GenerationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GenerationError>>,
{
    let max_attempts = policy.attempts();
    let mut current = 0;

    loop {
        let error = match attempt().await {
            Ok(value) => {
                if current > 0 {
                    info!("Generated {} on attempt {}/{}", context, current + 1, max_attempts);
                }
                return Ok(value);
            }
            Err(e) if !e.is_recoverable() => return Err(e),
            Err(e) => e,
        };

        if current + 1 >= max_attempts {
            error!(
                "Giving up on {} after {} attempt(s): {}",
                context, max_attempts, error
            );
            return Err(GenerationError::RetriesExhausted {
                context: context.to_string(),
                attempts: max_attempts,
                source: Box::new(error),
            });
        }

        let delay = policy.delay_for(current);
        warn!(
            "Attempt {}/{} for {} failed: {}. Retrying in {:?}",
            current + 1,
            max_attempts,
            context,
            error,
            delay
        );
        tokio::time::sleep(delay).await;
        current += 1;
    }
}

/// Ask a provider for a reply and parse it into `T`, retrying malformed replies
pub async fn generate_json<T, P>(
    context: &str,
    policy: &RetryPolicy,
    provider: &P,
    prompt: &str,
) -> Result<T, GenerationError>
where
    T: DeserializeOwned,
    P: Provider + ?Sized,
{
    generate_with_retry(context, policy, move || async move {
        let reply = provider.complete(prompt).await?;
        parse_json_response::<T>(&reply)
    })
    .await
}
