//! Quiz requests and the raw form input they are built from.

use serde::{Deserialize, Serialize};

use crate::quiz::core::errors::{QuizError, QuizResult};
use crate::quiz::core::kinds::{ModelCatalog, QuizType};

/// Smallest number of questions a quiz may ask for.
pub const MIN_QUESTIONS: u32 = 1;
/// Largest number of questions a quiz may ask for.
pub const MAX_QUESTIONS: u32 = 10;
/// Question count used when the form leaves it empty.
pub const DEFAULT_QUESTIONS: u32 = 3;

/// A validated quiz request, consumed once by the prompt builder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizRequest {
    /// Number of questions, within `MIN_QUESTIONS..=MAX_QUESTIONS`.
    pub question_count: u32,
    /// Requested quiz style.
    pub quiz_type: QuizType,
    /// Concept or content the quiz is about (may be empty).
    pub context: String,
    /// Generation model identifier.
    pub model: String,
}

impl QuizRequest {
    /// Build a request, checking the question count bounds.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `question_count` is outside 1..=10.
    pub fn new(
        question_count: u32,
        quiz_type: QuizType,
        context: impl Into<String>,
        model: impl Into<String>,
    ) -> QuizResult<Self> {
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&question_count) {
            return Err(QuizError::InvalidParameter(format!(
                "number of questions must be between {MIN_QUESTIONS} and {MAX_QUESTIONS}, got {question_count}"
            )));
        }

        Ok(Self {
            question_count,
            quiz_type,
            context: context.into(),
            model: model.into(),
        })
    }
}

/// Raw values submitted by the quiz form. Missing fields take their defaults.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuizForm {
    /// Concept/context text.
    #[serde(default)]
    pub context: Option<String>,
    /// Requested number of questions.
    #[serde(default)]
    pub num_questions: Option<i64>,
    /// Quiz type name (`multiple-choice`, `true-false`, `open-ended`).
    #[serde(default)]
    pub quiz_type: Option<String>,
    /// Model identifier.
    #[serde(default)]
    pub model: Option<String>,
}

impl QuizForm {
    /// Apply defaults and validate every field.
    ///
    /// # Errors
    /// Returns `InvalidParameter` for an out-of-range count, an unknown quiz
    /// type or a model that is not in `catalog`.
    pub fn into_request(self, catalog: &ModelCatalog) -> QuizResult<QuizRequest> {
        let question_count = match self.num_questions {
            None => DEFAULT_QUESTIONS,
            Some(raw) => u32::try_from(raw).map_err(|_| {
                QuizError::InvalidParameter(format!(
                    "number of questions must be between {MIN_QUESTIONS} and {MAX_QUESTIONS}, got {raw}"
                ))
            })?,
        };

        let quiz_type = match self.quiz_type.as_deref().map(str::trim) {
            None | Some("") => QuizType::default(),
            Some(name) => name.parse()?,
        };

        let model = catalog.resolve(self.model.as_deref())?;

        QuizRequest::new(
            question_count,
            quiz_type,
            self.context.unwrap_or_default(),
            model,
        )
    }
}
