//! Text generation abstraction shared by the quiz pipeline and the server.

use thiserror::Error;

/// Errors produced by a text generation backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Transport-level failure (connect, timeout, body decoding).
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the service.
        body: String,
    },
    /// The client could not be set up from its configuration.
    #[error("invalid generation client configuration: {0}")]
    Config(String),
    /// The service answered without any candidate text.
    #[error("no candidate text in response")]
    EmptyResponse {
        /// Reason given by the service for blocking the prompt, if any.
        block_reason: Option<String>,
    },
}

/// Convenience result alias for generation calls.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Blocking prompt-in, text-out generation backend.
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt` with the model named `model`.
    ///
    /// # Errors
    /// Returns an error if the call fails or yields no text.
    fn generate(&self, prompt: &str, model: &str) -> GenerationResult<String>;
}
