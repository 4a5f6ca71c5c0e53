//! Core quiz types: kinds, requests and errors.

pub mod errors;
pub mod kinds;
pub mod request;

pub use errors::{QuizError, QuizResult};
pub use kinds::{AVAILABLE_MODELS, DEFAULT_MODEL, ModelCatalog, QuizType};
pub use request::{DEFAULT_QUESTIONS, MAX_QUESTIONS, MIN_QUESTIONS, QuizForm, QuizRequest};
