/*!
 * Provider seam for model calls.
 *
 * Network clients for concrete model APIs live outside this crate. Anything
 * that can turn a prompt into reply text implements `Provider` and can be
 * driven by `response::generate_json`.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all LLM providers
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Send a prompt and return the raw reply text
    ///
    /// # Arguments
    /// * `prompt` - The fully rendered prompt
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The reply text or a provider fault
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Short name used in log messages
    fn name(&self) -> &str;
}

pub mod mock;
