//! Quiz orchestration: prompt, generation, split, session update.

use std::sync::Arc;

use crate::llm::TextGenerator;
use crate::quiz::core::errors::{QuizError, QuizResult};
use crate::quiz::core::kinds::ModelCatalog;
use crate::quiz::core::request::{QuizForm, QuizRequest};
use crate::quiz::prompt::build_quiz_prompt;
use crate::quiz::response::QuizResponse;
use crate::quiz::session::{GeneratedQuiz, SessionId, SessionStore};

/// Runs the quiz pipeline and owns the session state.
pub struct QuizService {
    generator: Arc<dyn TextGenerator>,
    catalog: ModelCatalog,
    sessions: SessionStore,
}

impl QuizService {
    /// Create a service over `generator`.
    #[must_use]
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        catalog: ModelCatalog,
        sessions: SessionStore,
    ) -> Self {
        Self {
            generator,
            catalog,
            sessions,
        }
    }

    /// Models users may choose from.
    #[must_use]
    pub const fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Session state backing the service.
    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Validate raw form input against the model catalog.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if any field is out of range or unknown.
    pub fn request_from_form(&self, form: QuizForm) -> QuizResult<QuizRequest> {
        form.into_request(&self.catalog)
    }

    /// Build the prompt, call the generator once and split the reply.
    ///
    /// # Errors
    /// Returns `Service` or `EmptyResponse` if generation fails and
    /// `MissingDelimiter` if the reply has no answers section.
    pub fn generate(&self, request: &QuizRequest) -> QuizResult<QuizResponse> {
        let prompt = build_quiz_prompt(request);
        tracing::debug!(
            model = %request.model,
            quiz_type = %request.quiz_type,
            questions = request.question_count,
            prompt_chars = prompt.len(),
            "quiz prompt built"
        );

        let raw_text = self.generator.generate(&prompt, &request.model)?;
        QuizResponse::parse(raw_text)
    }

    /// Generate a quiz and make it the last quiz of `session`.
    ///
    /// On failure the session keeps its previous quiz.
    ///
    /// # Errors
    /// Same as [`QuizService::generate`].
    pub fn generate_quiz(
        &self,
        session: SessionId,
        request: QuizRequest,
    ) -> QuizResult<GeneratedQuiz> {
        self.sessions.open(session);

        match self.generate(&request) {
            Ok(response) => {
                let quiz = GeneratedQuiz::new(request, response);
                self.sessions.store_quiz(session, quiz.clone());
                tracing::info!(%session, "quiz generated");
                Ok(quiz)
            }
            Err(err) => {
                log_failure(session, &err);
                Err(err)
            }
        }
    }

    /// Last quiz of `session`, with its answers; absent before the first
    /// successful generation.
    #[must_use]
    pub fn show_answers(&self, session: SessionId) -> Option<GeneratedQuiz> {
        self.sessions.last_quiz(session)
    }
}

fn log_failure(session: SessionId, err: &QuizError) {
    tracing::warn!(%session, kind = err.kind(), "quiz generation failed: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::stub::{StubGenerator, StubReply};
    use crate::quiz::core::kinds::{DEFAULT_MODEL, QuizType};

    const REPLY: &str = "Q1?\nQ2?\n**Answers:**\n1. True\n2. False";

    fn service(stub: &Arc<StubGenerator>) -> QuizService {
        let generator: Arc<dyn TextGenerator> = Arc::clone(stub) as Arc<dyn TextGenerator>;
        QuizService::new(generator, ModelCatalog::default(), SessionStore::default())
    }

    fn true_false_request() -> QuizRequest {
        let Ok(request) = QuizRequest::new(3, QuizType::TrueFalse, "binary search trees", DEFAULT_MODEL)
        else {
            unreachable!("valid request");
        };
        request
    }

    #[test]
    fn test_end_to_end_true_false_quiz() {
        let stub = Arc::new(StubGenerator::text(REPLY));
        let service = service(&stub);
        let session = SessionId::new();

        let quiz = service.generate_quiz(session, true_false_request());
        let Ok(quiz) = quiz else {
            unreachable!("stubbed reply is well formed");
        };
        assert_eq!(quiz.response.questions(), "Q1?\nQ2?\n");

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("3 true-false questions"));
        assert!(calls[0].0.contains("binary search trees"));
        assert_eq!(calls[0].1, DEFAULT_MODEL);

        let shown = service.show_answers(session);
        assert_eq!(
            shown.as_ref().map(|q| q.response.answers()),
            Some("\n1. True\n2. False")
        );
    }

    #[test]
    fn test_show_answers_before_generation_is_absent() {
        let stub = Arc::new(StubGenerator::text(REPLY));
        let service = service(&stub);
        assert!(service.show_answers(SessionId::new()).is_none());
        assert!(stub.calls().is_empty());
    }

    #[test]
    fn test_missing_delimiter_is_reported() {
        let stub = Arc::new(StubGenerator::text("1. Q1?\n2. Q2?\nAnswers: True, False"));
        let service = service(&stub);
        let session = SessionId::new();

        let result = service.generate_quiz(session, true_false_request());
        assert!(matches!(result, Err(QuizError::MissingDelimiter)));
        assert!(service.show_answers(session).is_none());
    }

    #[test]
    fn test_failures_keep_previous_quiz() {
        let stub = Arc::new(StubGenerator::text(REPLY));
        let service = service(&stub);
        let session = SessionId::new();
        assert!(service.generate_quiz(session, true_false_request()).is_ok());

        stub.set_reply(StubReply::Empty);
        let result = service.generate_quiz(session, true_false_request());
        assert!(matches!(result, Err(QuizError::EmptyResponse)));

        stub.set_reply(StubReply::Status(503));
        let result = service.generate_quiz(session, true_false_request());
        assert!(matches!(result, Err(QuizError::Service(_))));

        let shown = service.show_answers(session);
        assert_eq!(
            shown.as_ref().map(|q| q.response.questions()),
            Some("Q1?\nQ2?\n")
        );
        assert_eq!(stub.calls().len(), 3);
    }

    #[test]
    fn test_new_generation_replaces_previous() {
        let stub = Arc::new(StubGenerator::new(StubReply::Text(REPLY.to_string())));
        let service = service(&stub);
        let session = SessionId::new();
        assert!(service.generate_quiz(session, true_false_request()).is_ok());

        stub.set_reply(StubReply::Text("Q9?\n**Answers:**\n9. a".to_string()));
        assert!(service.generate_quiz(session, true_false_request()).is_ok());

        let shown = service.show_answers(session);
        assert_eq!(shown.as_ref().map(|q| q.response.answers()), Some("\n9. a"));
        assert_eq!(service.sessions().len(), 1);
    }

    #[test]
    fn test_request_from_form_uses_catalog() {
        let stub = Arc::new(StubGenerator::text(REPLY));
        let service = service(&stub);
        let form = QuizForm {
            model: Some("models/gemini-1.5-pro".to_string()),
            ..QuizForm::default()
        };
        let request = service.request_from_form(form);
        assert_eq!(
            request.ok().map(|r| r.model),
            Some("models/gemini-1.5-pro".to_string())
        );
        assert!(service.catalog().contains(DEFAULT_MODEL));
    }
}
