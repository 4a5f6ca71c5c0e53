//! Text generation backends.

pub mod gemini;
pub mod generator;
#[cfg(test)]
pub(crate) mod stub;

pub use gemini::{GeminiClient, GeminiConfig};
pub use generator::{GenerationError, GenerationResult, TextGenerator};
