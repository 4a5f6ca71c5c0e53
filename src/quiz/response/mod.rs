//! Model reply parsing.

pub mod splitter;

pub use splitter::{ANSWERS_DELIMITER, QuizResponse, split_sections};
