//! Per-session quiz state.
//!
//! A session holds at most one quiz: the last one generated. A new quiz
//! replaces the previous one; a failed generation leaves it untouched.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quiz::core::errors::QuizError;
use crate::quiz::core::request::QuizRequest;
use crate::quiz::response::QuizResponse;

/// Default number of sessions kept in memory.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Identifier of one interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SessionId {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| QuizError::InvalidParameter(format!("malformed session id `{s}`")))
    }
}

/// A quiz stored in a session.
#[derive(Clone, Debug)]
pub struct GeneratedQuiz {
    /// Request the quiz was generated from.
    pub request: QuizRequest,
    /// Parsed model reply.
    pub response: QuizResponse,
    /// Generation time.
    pub generated_at: DateTime<Utc>,
}

impl GeneratedQuiz {
    /// Stamp a freshly parsed reply.
    #[must_use]
    pub fn new(request: QuizRequest, response: QuizResponse) -> Self {
        Self {
            request,
            response,
            generated_at: Utc::now(),
        }
    }
}

/// State of one session.
#[derive(Clone, Debug)]
pub struct QuizSession {
    last_quiz: Option<GeneratedQuiz>,
    updated_at: DateTime<Utc>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self {
            last_quiz: None,
            updated_at: Utc::now(),
        }
    }
}

impl QuizSession {
    /// Last generated quiz, absent before the first successful generation.
    #[must_use]
    pub const fn last_quiz(&self) -> Option<&GeneratedQuiz> {
        self.last_quiz.as_ref()
    }

    /// Questions section of the last quiz.
    #[must_use]
    pub fn questions(&self) -> Option<&str> {
        self.last_quiz.as_ref().map(|q| q.response.questions())
    }

    /// Answers section of the last quiz.
    #[must_use]
    pub fn answers(&self) -> Option<&str> {
        self.last_quiz.as_ref().map(|q| q.response.answers())
    }

    /// Last time the session was opened or written.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn replace(&mut self, quiz: GeneratedQuiz) {
        self.updated_at = quiz.generated_at;
        self.last_quiz = Some(quiz);
    }
}

/// In-memory session store, bounded by `max_sessions`.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<SessionId, QuizSession>,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    /// Create an empty store keeping at most `max_sessions` sessions.
    #[must_use]
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Make sure `id` exists, evicting the least recently updated sessions
    /// when the store is over capacity.
    ///
    /// The lookup and insert are one atomic `entry` call. Eviction runs after
    /// the shard lock is released, so concurrent opens may briefly exceed
    /// `max_sessions`; the bound holds again once every `open` has returned.
    pub fn open(&self, id: SessionId) {
        match self.sessions.entry(id) {
            Entry::Occupied(_) => return,
            Entry::Vacant(slot) => {
                slot.insert(QuizSession::default());
            }
        }
        self.enforce_max_sessions(id);
    }

    /// Replace the last quiz of `id`.
    pub fn store_quiz(&self, id: SessionId, quiz: GeneratedQuiz) {
        self.open(id);
        self.sessions.entry(id).or_default().replace(quiz);
    }

    /// Snapshot of session `id`, if it exists.
    #[must_use]
    pub fn get(&self, id: SessionId) -> Option<QuizSession> {
        self.sessions.get(&id).map(|s| s.value().clone())
    }

    /// Last quiz of session `id`; absent for unknown sessions and sessions
    /// that never generated a quiz.
    #[must_use]
    pub fn last_quiz(&self, id: SessionId) -> Option<GeneratedQuiz> {
        self.sessions
            .get(&id)
            .and_then(|s| s.value().last_quiz().cloned())
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn enforce_max_sessions(&self, keep: SessionId) {
        while self.sessions.len() > self.max_sessions {
            let oldest = self
                .sessions
                .iter()
                .filter(|entry| *entry.key() != keep)
                .min_by_key(|entry| entry.value().updated_at())
                .map(|entry| *entry.key());
            match oldest {
                Some(id) => {
                    tracing::debug!(session = %id, "evicting least recently used quiz session");
                    self.sessions.remove(&id);
                }
                None => break,
            }
        }
    }
}
