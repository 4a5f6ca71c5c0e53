//! Application state shared across all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::llm::{GeminiClient, TextGenerator};
use crate::quiz::core::kinds::ModelCatalog;
use crate::quiz::service::QuizService;
use crate::quiz::session::SessionStore;

/// Shared application state.
pub struct AppState {
    /// Quiz pipeline and session state.
    pub quiz: QuizService,
    /// Directory holding the form assets.
    pub static_dir: PathBuf,
}

impl AppState {
    /// Create the state with a Gemini client built from `config`.
    ///
    /// Must be called outside the async runtime: the blocking HTTP client
    /// cannot be built from an async context.
    ///
    /// # Errors
    /// Returns an error if the Gemini client cannot be created.
    pub fn new(config: &AppConfig) -> Result<Arc<Self>, Box<dyn std::error::Error + Send + Sync>> {
        let client = GeminiClient::new(config.gemini.clone())
            .map_err(|e| format!("Failed to create Gemini client: {e}"))?;

        Ok(Self::with_generator(
            Arc::new(client),
            config.catalog.clone(),
            SessionStore::new(config.max_sessions),
            config.server.static_dir.clone(),
        ))
    }

    /// Create the state around any generator.
    #[must_use]
    pub fn with_generator(
        generator: Arc<dyn TextGenerator>,
        catalog: ModelCatalog,
        sessions: SessionStore,
        static_dir: PathBuf,
    ) -> Arc<Self> {
        Arc::new(Self {
            quiz: QuizService::new(generator, catalog, sessions),
            static_dir,
        })
    }
}
