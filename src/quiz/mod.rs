//! Quiz generation: prompt construction, reply splitting and session state.
//!
//! Pipeline for one "Generate Quiz" action:
//! 1. `QuizForm` -> validated `QuizRequest`
//! 2. `build_quiz_prompt`
//! 3. one `TextGenerator::generate` call
//! 4. `QuizResponse::parse` splits the reply on `**Answers:**`
//! 5. the result replaces the session's last quiz

pub mod core;
pub mod prompt;
pub mod response;
pub mod service;
pub mod session;

pub use self::core::{QuizError, QuizForm, QuizRequest, QuizResult, QuizType};
pub use prompt::{build_prompt, build_quiz_prompt};
pub use response::{ANSWERS_DELIMITER, QuizResponse, split_sections};
pub use service::QuizService;
pub use session::{GeneratedQuiz, SessionId, SessionStore};
