//! Splits a model reply into its questions and answers sections.

use crate::quiz::core::errors::{QuizError, QuizResult};

/// Marker the prompt asks the model to write right before the answers block.
pub const ANSWERS_DELIMITER: &str = "**Answers:**";

/// Split `raw_text` at the first `ANSWERS_DELIMITER`.
///
/// Concatenating the questions, the delimiter and the answers gives back
/// `raw_text` exactly.
///
/// # Errors
/// Returns `MissingDelimiter` if the marker does not occur in `raw_text`.
pub fn split_sections(raw_text: &str) -> QuizResult<(&str, &str)> {
    raw_text
        .split_once(ANSWERS_DELIMITER)
        .ok_or(QuizError::MissingDelimiter)
}

/// A model reply with the position of its answers delimiter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResponse {
    raw_text: String,
    delimiter_at: usize,
}

impl QuizResponse {
    /// Locate the sections of `raw_text`.
    ///
    /// # Errors
    /// Returns `MissingDelimiter` if the marker does not occur in `raw_text`.
    pub fn parse(raw_text: String) -> QuizResult<Self> {
        let delimiter_at = raw_text
            .find(ANSWERS_DELIMITER)
            .ok_or(QuizError::MissingDelimiter)?;
        Ok(Self {
            raw_text,
            delimiter_at,
        })
    }

    /// The full reply as returned by the generation service.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Everything before the first delimiter.
    #[must_use]
    pub fn questions(&self) -> &str {
        &self.raw_text[..self.delimiter_at]
    }

    /// Everything after the first delimiter.
    #[must_use]
    pub fn answers(&self) -> &str {
        &self.raw_text[self.delimiter_at + ANSWERS_DELIMITER.len()..]
    }
}
