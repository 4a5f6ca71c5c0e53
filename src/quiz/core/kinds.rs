//! Quiz types and the catalog of generation models offered to the user.
//!
//! The quiz type only changes the wording of the prompt; the model reply is
//! never checked against it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::quiz::core::errors::{QuizError, QuizResult};

/// Model selected when the form does not name one.
pub const DEFAULT_MODEL: &str = "models/gemini-1.5-flash";

/// Models offered by the form, default first.
pub const AVAILABLE_MODELS: [&str; 2] = [DEFAULT_MODEL, "models/gemini-1.5-pro"];

/// Style of the generated quiz.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizType {
    /// Four lettered options per question, answers are letters.
    #[default]
    MultipleChoice,
    /// Statements answered with True or False.
    TrueFalse,
    /// Free-form questions with reference answers.
    OpenEnded,
}

impl QuizType {
    /// Every quiz type, in the order the form lists them.
    pub const ALL: [Self; 3] = [Self::MultipleChoice, Self::TrueFalse, Self::OpenEnded];

    /// Stable string representation, as written in prompts and API payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple-choice",
            Self::TrueFalse => "true-false",
            Self::OpenEnded => "open-ended",
        }
    }
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuizType {
    type Err = QuizError;

    fn from_str(value: &str) -> QuizResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| {
                QuizError::InvalidParameter(format!(
                    "unknown quiz type `{value}` (expected one of: multiple-choice, true-false, open-ended)"
                ))
            })
    }
}

/// Set of model identifiers the form may submit.
///
/// Identifiers are opaque to the pipeline; the catalog only restricts what
/// users can pick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    /// Offered model identifiers.
    pub models: Vec<String>,
    /// Identifier used when the form leaves the model empty.
    pub default_model: String,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            models: AVAILABLE_MODELS.iter().map(ToString::to_string).collect(),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ModelCatalog {
    /// Whether `model` is one of the offered identifiers.
    #[must_use]
    pub fn contains(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    /// Resolve the user's choice, falling back to the default model.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if the model is not offered.
    pub fn resolve(&self, model: Option<&str>) -> QuizResult<String> {
        match model.map(str::trim).filter(|m| !m.is_empty()) {
            None => Ok(self.default_model.clone()),
            Some(model) if self.contains(model) => Ok(model.to_string()),
            Some(model) => Err(QuizError::InvalidParameter(format!(
                "unknown model `{model}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_type_round_trips_through_str() {
        for kind in QuizType::ALL {
            assert_eq!(kind.as_str().parse::<QuizType>().ok(), Some(kind));
        }
    }

    #[test]
    fn test_unknown_quiz_type_is_rejected() {
        let err = "essay".parse::<QuizType>();
        assert!(matches!(err, Err(QuizError::InvalidParameter(_))));
    }

    #[test]
    fn test_quiz_type_serde_uses_kebab_case() {
        let json = serde_json::to_string(&QuizType::TrueFalse).unwrap_or_default();
        assert_eq!(json, "\"true-false\"");
    }

    #[test]
    fn test_catalog_resolution() {
        let catalog = ModelCatalog::default();
        assert_eq!(catalog.resolve(None).ok().as_deref(), Some(DEFAULT_MODEL));
        assert_eq!(catalog.resolve(Some("  ")).ok().as_deref(), Some(DEFAULT_MODEL));
        assert_eq!(
            catalog.resolve(Some("models/gemini-1.5-pro")).ok().as_deref(),
            Some("models/gemini-1.5-pro")
        );
        assert!(catalog.resolve(Some("models/unknown")).is_err());
    }
}
