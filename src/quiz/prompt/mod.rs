//! Prompt construction modules.

pub mod prompt_builder;

pub use prompt_builder::{build_prompt, build_quiz_prompt};
