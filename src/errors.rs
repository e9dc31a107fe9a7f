/*!
 * Error types for the lectern application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a model provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while turning a model reply into structured data
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The cleaned reply was not valid JSON
    #[error("Malformed JSON in model response: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The reply parsed but a required key was absent
    #[error("Model response is missing required key: {0}")]
    MissingKey(String),

    /// The reply parsed but a value was unusable
    #[error("Model response failed validation: {0}")]
    InvalidValue(String),

    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Every attempt failed with a recoverable error
    #[error("Failed to generate {context} after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        /// What was being generated (exercise or content type)
        context: String,
        /// Number of attempts made
        attempts: u32,
        /// The error from the final attempt
        source: Box<GenerationError>,
    },
}

impl GenerationError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Only parse and validation failures qualify; provider faults are
    /// systemic and never retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GenerationError::MalformedJson(_)
                | GenerationError::MissingKey(_)
                | GenerationError::InvalidValue(_)
        )
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error while generating structured output
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
