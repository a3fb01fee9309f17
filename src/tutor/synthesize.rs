//! Explanation synthesis stage

use super::relations::RelationEdge;
use crate::llm::{ChatMessage, ChatRequest, LanguageModel};
use std::sync::Arc;

pub const EXPLANATION_UNAVAILABLE: &str = "Sorry, I couldn't refine the explanation.";
pub const NO_RELATIONSHIPS_TO_EXPLAIN: &str =
    "Could not find any commonsense relationships to build an explanation.";

/// Weaves relation statements into one explanatory paragraph.
pub struct ExplanationSynthesizer {
    model: Arc<dyn LanguageModel>,
    temperature: f32,
}

impl ExplanationSynthesizer {
    pub fn new(model: Arc<dyn LanguageModel>, temperature: f32) -> Self {
        Self { model, temperature }
    }

    fn prompt(question: &str, relations: &[RelationEdge]) -> String {
        let bullets = relations
            .iter()
            .map(|r| format!("- {}", r))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Given a user's question and a set of commonsense relationships, synthesize them \
             into a single, easy-to-understand paragraph that explains the reasoning.\n\n\
             User Question: \"{}\"\n\
             Commonsense Relationships:\n\
             {}\n\n\
             Generated Explanation:",
            question, bullets
        )
    }

    /// An empty `relations` slice yields `NO_RELATIONSHIPS_TO_EXPLAIN`
    /// without calling the model.
    pub async fn synthesize(&self, question: &str, relations: &[RelationEdge]) -> String {
        if relations.is_empty() {
            return NO_RELATIONSHIPS_TO_EXPLAIN.to_string();
        }

        let request = ChatRequest::new(vec![ChatMessage::user(Self::prompt(question, relations))])
            .with_temperature(self.temperature);

        match self.model.complete(&request).await {
            Ok(explanation) => explanation,
            Err(e) => {
                tracing::warn!(error = %e, relations = relations.len(), "explanation synthesis failed");
                EXPLANATION_UNAVAILABLE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockModel;

    fn relations() -> Vec<RelationEdge> {
        vec![
            RelationEdge::new("sunscreen", "UsedFor", "uv_rays"),
            RelationEdge::new("sun", "RelatedTo", "skin"),
        ]
    }

    #[test]
    fn prompt_lists_relations_as_bullets() {
        let prompt = ExplanationSynthesizer::prompt("Why do we use sunscreen?", &relations());
        assert!(prompt.contains("User Question: \"Why do we use sunscreen?\""));
        assert!(prompt.contains("- \"sunscreen\" UsedFor \"uv_rays\"\n- \"sun\" RelatedTo \"skin\""));
        assert!(prompt.ends_with("Generated Explanation:"));
    }

    #[tokio::test]
    async fn uses_lower_temperature_and_returns_paragraph() {
        let model = Arc::new(
            MockModel::available().with_reply("Sunscreen blocks UV rays that damage skin."),
        );
        let synthesizer = ExplanationSynthesizer::new(model.clone(), 0.5);

        let paragraph = synthesizer
            .synthesize("Why do we use sunscreen?", &relations())
            .await;
        assert_eq!(paragraph, "Sunscreen blocks UV rays that damage skin.");

        let requests = model.requests();
        assert_eq!(requests[0].temperature, Some(0.5));
        assert!(!requests[0].json_output);
    }

    #[tokio::test]
    async fn empty_relations_skip_the_model() {
        let model = Arc::new(MockModel::available().with_reply("unused"));
        let synthesizer = ExplanationSynthesizer::new(model.clone(), 0.5);

        let paragraph = synthesizer.synthesize("Why?", &[]).await;
        assert_eq!(paragraph, NO_RELATIONSHIPS_TO_EXPLAIN);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn model_failure_yields_apology() {
        let model = Arc::new(MockModel::unavailable());
        let synthesizer = ExplanationSynthesizer::new(model, 0.5);

        let paragraph = synthesizer.synthesize("Why?", &relations()).await;
        assert_eq!(paragraph, EXPLANATION_UNAVAILABLE);
    }
}
