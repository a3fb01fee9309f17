//! Language-model capability: chat completion behind a trait
//!
//! Defines the client trait and request/response types used by the
//! answer, extraction and synthesis stages. Two implementations:
//! - `ChatCompletionsClient`: OpenAI-compatible HTTP endpoint (production)
//! - `MockModel`: scripted replies (testing)

mod http;
mod mock;

pub use http::ChatCompletionsClient;
pub use mock::MockModel;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single role-tagged message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One completion request.
///
/// The model identifier belongs to the client, not the request, so the
/// pipeline stages stay independent of which model is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature; `None` leaves the service default.
    pub temperature: Option<f32>,
    /// Ask the service for a JSON object instead of free text.
    pub json_output: bool,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            json_output: false,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }

    /// Content of the last user message, if any.
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Errors from language-model calls.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("language model not available: {0}")]
    Unavailable(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("response contained no completion")]
    EmptyResponse,
}

/// Client trait for chat completion.
///
/// Abstracts over transport (HTTP, mock) so the pipeline stages don't
/// depend on how the model is reached.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run one completion and return the generated text.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}
