//! Canned generator used by unit tests.

use std::sync::Mutex;

use crate::llm::generator::{GenerationError, GenerationResult, TextGenerator};

/// What the stub answers with.
#[derive(Clone, Debug)]
pub enum StubReply {
    /// Return this text.
    Text(String),
    /// Report an empty candidate list.
    Empty,
    /// Report a non-success status.
    Status(u16),
}

/// Generator returning a fixed reply and recording every call.
#[derive(Debug)]
pub struct StubGenerator {
    reply: Mutex<StubReply>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubGenerator {
    /// Stub that always answers with `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(StubReply::Text(text.into()))
    }

    /// Stub that always answers with `reply`.
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply: Mutex::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Change the reply for later calls.
    pub fn set_reply(&self, reply: StubReply) {
        if let Ok(mut current) = self.reply.lock() {
            *current = reply;
        }
    }

    /// `(prompt, model)` pairs received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl TextGenerator for StubGenerator {
    fn generate(&self, prompt: &str, model: &str) -> GenerationResult<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((prompt.to_string(), model.to_string()));
        }

        let reply = self
            .reply
            .lock()
            .map(|r| r.clone())
            .unwrap_or(StubReply::Empty);
        match reply {
            StubReply::Text(text) => Ok(text),
            StubReply::Empty => Err(GenerationError::EmptyResponse { block_reason: None }),
            StubReply::Status(status) => Err(GenerationError::Status {
                status,
                body: "stubbed failure".to_string(),
            }),
        }
    }
}
