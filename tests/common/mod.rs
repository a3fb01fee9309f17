//! Shared fixtures for pipeline tests
//!
//! Builds tutors over mock capabilities with scripted model replies for
//! the three language-model stages (answer, extraction, synthesis).

use grallm::{MockGraph, MockModel, Tutor, TutorConfig};
use std::sync::Arc;

pub const SUNSCREEN_QUESTION: &str = "Why do we use sunscreen?";
pub const SUNSCREEN_ANSWER: &str =
    "Sunscreen protects your skin from the sun's harmful UV rays, which cause sunburn.";
pub const SUNSCREEN_CONCEPTS: &str = r#"{
    "question_concepts": ["Sunscreen"],
    "answer_concepts": ["Skin", "Sun", "UV Rays"]
}"#;
pub const SUNSCREEN_EXPLANATION: &str = "We use sunscreen because sunscreen is used for \
    blocking uv_rays from the sun, and those rays damage skin.";

/// Model scripted for a full run: answer, concepts, explanation.
pub fn scripted_model(answer: &str, concepts: &str, explanation: &str) -> Arc<MockModel> {
    Arc::new(
        MockModel::available()
            .with_reply(answer)
            .with_reply(concepts)
            .with_reply(explanation),
    )
}

pub fn sunscreen_model() -> Arc<MockModel> {
    scripted_model(SUNSCREEN_ANSWER, SUNSCREEN_CONCEPTS, SUNSCREEN_EXPLANATION)
}

pub fn config_with_concurrency(limit: usize) -> TutorConfig {
    TutorConfig {
        relation_concurrency: limit,
        ..TutorConfig::default()
    }
}

pub fn tutor(model: &Arc<MockModel>, graph: &Arc<MockGraph>, config: &TutorConfig) -> Tutor {
    Tutor::new(model.clone(), graph.clone(), config)
}
