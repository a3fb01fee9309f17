//! Direct answer stage

use crate::llm::{ChatMessage, ChatRequest, LanguageModel};
use std::sync::Arc;

pub const TUTOR_FRAMING: &str =
    "You are a helpful tutor. Answer the user's question clearly and concisely.";

pub const ANSWER_UNAVAILABLE: &str =
    "Sorry, I couldn't generate an answer at the moment. The AI service might be down.";

/// Produces the fluent answer shown next to the grounded explanation.
pub struct AnswerGenerator {
    model: Arc<dyn LanguageModel>,
    temperature: f32,
}

impl AnswerGenerator {
    pub fn new(model: Arc<dyn LanguageModel>, temperature: f32) -> Self {
        Self { model, temperature }
    }

    fn request(&self, question: &str) -> ChatRequest {
        ChatRequest::new(vec![
            ChatMessage::system(TUTOR_FRAMING),
            ChatMessage::user(question),
        ])
        .with_temperature(self.temperature)
    }

    /// Never fails: a model error yields `ANSWER_UNAVAILABLE`.
    pub async fn generate_answer(&self, question: &str) -> String {
        match self.model.complete(&self.request(question)).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "answer generation failed");
                ANSWER_UNAVAILABLE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{MockModel, Role};

    #[tokio::test]
    async fn sends_tutor_framing_and_question() {
        let model = Arc::new(MockModel::available().with_reply("Because UV light burns skin."));
        let generator = AnswerGenerator::new(model.clone(), 0.7);

        let answer = generator.generate_answer("Why do we use sunscreen?").await;
        assert_eq!(answer, "Because UV light burns skin.");

        let requests = model.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, TUTOR_FRAMING);
        assert_eq!(request.user_prompt(), Some("Why do we use sunscreen?"));
        assert_eq!(request.temperature, Some(0.7));
        assert!(!request.json_output);
    }

    #[tokio::test]
    async fn model_failure_yields_apology() {
        let model = Arc::new(MockModel::available().with_failure("connection reset"));
        let generator = AnswerGenerator::new(model, 0.7);

        assert_eq!(generator.generate_answer("Why?").await, ANSWER_UNAVAILABLE);
    }
}
