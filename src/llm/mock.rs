//! Mock language model for testing: replays scripted replies in call order

use super::{ChatRequest, LanguageModel, LlmError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

enum Scripted {
    Reply(String),
    Failure(String),
}

/// Scripted language model.
///
/// Each `complete()` call consumes the next scripted entry. Every request is
/// recorded so tests can assert which stages reached the model.
pub struct MockModel {
    available: bool,
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockModel {
    /// Create a mock that answers from its script.
    pub fn available() -> Self {
        Self {
            available: true,
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose every call fails as unavailable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::available()
        }
    }

    /// Queue a successful reply.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.push(Scripted::Reply(text.into()));
        self
    }

    /// Queue a failing call.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(Scripted::Failure(message.into()));
        self
    }

    fn push(&self, entry: Scripted) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(entry);
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        if !self.available {
            return Err(LlmError::Unavailable(
                "mock model configured as unavailable".to_string(),
            ));
        }

        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        match next {
            Some(Scripted::Reply(text)) => Ok(text),
            Some(Scripted::Failure(message)) => Err(LlmError::Transport(message)),
            None => Err(LlmError::Unavailable("mock script exhausted".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;

    fn request(text: &str) -> ChatRequest {
        ChatRequest::new(vec![ChatMessage::user(text)])
    }

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let model = MockModel::available()
            .with_reply("first")
            .with_failure("boom")
            .with_reply("third");

        assert_eq!(model.complete(&request("a")).await.unwrap(), "first");
        assert!(matches!(
            model.complete(&request("b")).await,
            Err(LlmError::Transport(_))
        ));
        assert_eq!(model.complete(&request("c")).await.unwrap(), "third");
        assert!(matches!(
            model.complete(&request("d")).await,
            Err(LlmError::Unavailable(_))
        ));
        assert_eq!(model.call_count(), 4);
        assert_eq!(model.requests()[2].user_prompt(), Some("c"));
    }

    #[tokio::test]
    async fn unavailable_model_fails_but_records() {
        let model = MockModel::unavailable().with_reply("never");

        let err = model.complete(&request("q")).await.unwrap_err();
        assert!(matches!(err, LlmError::Unavailable(_)));
        assert_eq!(model.call_count(), 1);
    }
}
