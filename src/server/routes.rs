//! HTTP route handlers for the quiz form API.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;

use crate::quiz::core::kinds::QuizType;
use crate::quiz::core::request::{DEFAULT_QUESTIONS, MAX_QUESTIONS, MIN_QUESTIONS, QuizForm};
use crate::quiz::{QuizError, SessionId};

use super::state::AppState;

/// Create the API router with all routes. Unmatched paths serve the form assets.
pub fn create_router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(&state.static_dir);
    Router::new()
        .route("/health", get(health_check))
        .route("/api/options", get(quiz_options))
        .route("/api/quiz", post(generate_quiz))
        .route("/api/quiz/{session_id}/answers", get(show_answers))
        .fallback_service(assets)
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "quiz-forge",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Error payload returned by every API route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable error kind.
    pub error: &'static str,
    /// Message to show to the user.
    pub message: String,
}

/// Error response with its status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error,
                message: message.into(),
            },
        }
    }
}

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        let status = match err {
            QuizError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            QuizError::Service(_) | QuizError::EmptyResponse | QuizError::MissingDelimiter => {
                StatusCode::BAD_GATEWAY
            }
        };
        Self::new(status, err.kind(), err.user_message())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("rejected request body: {rejection}");
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid_parameter",
            format!("Invalid form submission: {}", rejection.body_text()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Form options and defaults.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    /// Accepted quiz types.
    pub quiz_types: Vec<&'static str>,
    /// Default quiz type.
    pub default_quiz_type: &'static str,
    /// Offered models.
    pub models: Vec<String>,
    /// Default model.
    pub default_model: String,
    /// Smallest question count.
    pub min_questions: u32,
    /// Largest question count.
    pub max_questions: u32,
    /// Default question count.
    pub default_questions: u32,
}

/// List what the form may submit.
async fn quiz_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    let catalog = state.quiz.catalog();
    Json(OptionsResponse {
        quiz_types: QuizType::ALL.iter().map(|t| t.as_str()).collect(),
        default_quiz_type: QuizType::default().as_str(),
        models: catalog.models.clone(),
        default_model: catalog.default_model.clone(),
        min_questions: MIN_QUESTIONS,
        max_questions: MAX_QUESTIONS,
        default_questions: DEFAULT_QUESTIONS,
    })
}

/// "Generate Quiz" request.
#[derive(Debug, Deserialize)]
pub struct GenerateQuizRequest {
    /// Session to store the quiz in; a new session is opened when absent.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Form fields.
    #[serde(flatten)]
    pub form: QuizForm,
}

/// "Generate Quiz" response.
#[derive(Debug, Serialize)]
pub struct GenerateQuizResponse {
    /// Session the quiz is stored in.
    pub session_id: String,
    /// Questions section of the reply.
    pub questions: String,
    /// Status line for the form.
    pub message: &'static str,
}

/// Generate a quiz and store it in the caller's session.
async fn generate_quiz(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateQuizRequest>, JsonRejection>,
) -> Result<Json<GenerateQuizResponse>, ApiError> {
    let Json(request) = body?;
    let session = match request.session_id.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw.parse::<SessionId>()?,
        _ => SessionId::new(),
    };
    let quiz_request = state.quiz.request_from_form(request.form)?;

    let worker = Arc::clone(&state);
    let quiz = tokio::task::spawn_blocking(move || worker.quiz.generate_quiz(session, quiz_request))
        .await
        .map_err(|e| {
            tracing::error!("quiz generation task failed: {e}");
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "The quiz could not be generated. Please try again.",
            )
        })??;

    Ok(Json(GenerateQuizResponse {
        session_id: session.to_string(),
        questions: quiz.response.questions().to_string(),
        message: "Quiz Generated!",
    }))
}

/// "Show Answers" response.
#[derive(Debug, Serialize)]
pub struct AnswersResponse {
    /// Questions section of the last quiz.
    pub questions: String,
    /// Answers section of the last quiz.
    pub answers: String,
    /// Generation time, RFC 3339.
    pub generated_at: String,
}

/// Reveal the answers of the session's last quiz.
async fn show_answers(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<AnswersResponse>, ApiError> {
    let session = session_id.parse::<SessionId>()?;
    let quiz = state.quiz.show_answers(session).ok_or_else(|| {
        ApiError::new(
            StatusCode::NOT_FOUND,
            "no_quiz",
            "No quiz has been generated in this session yet. Generate a quiz first.",
        )
    })?;

    Ok(Json(AnswersResponse {
        questions: quiz.response.questions().to_string(),
        answers: quiz.response.answers().to_string(),
        generated_at: quiz.generated_at.to_rfc3339(),
    }))
}
