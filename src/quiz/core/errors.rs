//! Error types for the quiz pipeline.

use thiserror::Error;

use crate::llm::GenerationError;

/// Quiz pipeline error type.
#[derive(Debug, Error)]
pub enum QuizError {
    /// A request parameter is outside the accepted set.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// The generation service call failed (network, quota, authentication, status).
    #[error("generation service error: {0}")]
    Service(#[source] GenerationError),
    /// The generation service answered without any candidate text.
    #[error("generation service returned no text")]
    EmptyResponse,
    /// The model reply does not contain the answers delimiter.
    #[error("model reply is missing the **Answers:** delimiter")]
    MissingDelimiter,
}

impl QuizError {
    /// Stable identifier of the error kind (for API payloads and logs).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => "invalid_parameter",
            Self::Service(_) => "service_error",
            Self::EmptyResponse => "empty_response",
            Self::MissingDelimiter => "missing_delimiter",
        }
    }

    /// Message shown to the user when the error reaches the form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidParameter(detail) => format!("Invalid input: {detail}."),
            Self::Service(err) => {
                format!("The quiz could not be generated ({err}). Please try again.")
            }
            Self::EmptyResponse => "No response received from the model.".to_string(),
            Self::MissingDelimiter => "The model reply did not contain a separate answers \
                                       section. Please generate the quiz again."
                .to_string(),
        }
    }
}

impl From<GenerationError> for QuizError {
    fn from(value: GenerationError) -> Self {
        match value {
            GenerationError::EmptyResponse { .. } => Self::EmptyResponse,
            other => Self::Service(other),
        }
    }
}

/// Convenience result alias for quiz operations.
pub type QuizResult<T> = Result<T, QuizError>;
