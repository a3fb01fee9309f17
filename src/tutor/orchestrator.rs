//! Pipeline orchestration: answer, extract, relate, synthesize
//!
//! Each invocation walks one path of a small state machine and always ends
//! with an (answer, explanation) pair:
//!
//! ```text
//! START ─ empty question ──────────────────────────────▶ PromptUser
//!   └▶ ANSWERED ▶ EXTRACTED ─ insufficient concepts ───▶ InsufficientConcepts
//!                     └▶ RELATIONS-GATHERED ─ none ────▶ NoRelations
//!                             └▶ SYNTHESIZED ──────────▶ Explained
//! ```
//!
//! No stage retries and no error crosses `Tutor::run`.

use super::answer::AnswerGenerator;
use super::concepts::ConceptSet;
use super::extract::ConceptExtractor;
use super::relations::{RelationEdge, RelationFinder};
use super::synthesize::ExplanationSynthesizer;
use crate::config::TutorConfig;
use crate::knowledge::{ConceptNetClient, GraphError, KnowledgeGraph};
use crate::llm::{ChatCompletionsClient, LanguageModel, LlmError};
use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

pub const PROMPT_FOR_QUESTION: &str = "Please enter a question.";
pub const INSUFFICIENT_CONCEPTS: &str =
    "Could not extract sufficient concepts to build an explanation.";
pub const NO_RELATIONS: &str =
    "Could not find relevant commonsense relationships in ConceptNet for the extracted concepts.";

/// Terminal state an invocation ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PromptUser,
    InsufficientConcepts,
    NoRelations,
    Explained,
}

/// Result of one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct TutorReply {
    pub invocation_id: Uuid,
    pub answer: String,
    pub explanation: String,
    pub outcome: Outcome,
    /// Empty when the run stopped before extraction.
    pub concepts: ConceptSet,
    pub relations: Vec<RelationEdge>,
}

impl TutorReply {
    fn new(
        invocation_id: Uuid,
        answer: impl Into<String>,
        explanation: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        Self {
            invocation_id,
            answer: answer.into(),
            explanation: explanation.into(),
            outcome,
            concepts: ConceptSet::default(),
            relations: Vec::new(),
        }
    }

    /// The public (answer, explanation) pair.
    pub fn into_pair(self) -> (String, String) {
        (self.answer, self.explanation)
    }
}

/// Errors building a tutor from configuration.
#[derive(Debug, thiserror::Error)]
pub enum TutorError {
    #[error("language model client: {0}")]
    Llm(#[from] LlmError),
    #[error("knowledge graph client: {0}")]
    Graph(#[from] GraphError),
}

/// The commonsense grounding pipeline.
///
/// Holds only immutable clients, so one `Tutor` can serve concurrent
/// invocations.
pub struct Tutor {
    answerer: AnswerGenerator,
    extractor: ConceptExtractor,
    finder: RelationFinder,
    synthesizer: ExplanationSynthesizer,
}

impl Tutor {
    /// Wire the pipeline over explicit capabilities (real or mock).
    pub fn new(
        model: Arc<dyn LanguageModel>,
        graph: Arc<dyn KnowledgeGraph>,
        config: &TutorConfig,
    ) -> Self {
        Self {
            answerer: AnswerGenerator::new(model.clone(), config.llm.answer_temperature),
            extractor: ConceptExtractor::new(model.clone()),
            finder: RelationFinder::new(graph, &config.knowledge)
                .with_concurrency(config.lookup_concurrency()),
            synthesizer: ExplanationSynthesizer::new(model, config.llm.explanation_temperature),
        }
    }

    /// Build the production pipeline (HTTP model + ConceptNet).
    pub fn from_config(config: &TutorConfig) -> Result<Self, TutorError> {
        let model = Arc::new(ChatCompletionsClient::new(&config.llm)?);
        let graph = Arc::new(ConceptNetClient::new(&config.knowledge)?);
        Ok(Self::new(model, graph, config))
    }

    /// Answer `question` and ground the answer in commonsense relations.
    pub async fn run(&self, question: &str) -> TutorReply {
        let invocation_id = Uuid::new_v4();

        if question.trim().is_empty() {
            return TutorReply::new(invocation_id, PROMPT_FOR_QUESTION, "", Outcome::PromptUser);
        }

        let span = tracing::info_span!("tutor", invocation = %invocation_id);
        self.run_stages(invocation_id, question).instrument(span).await
    }

    async fn run_stages(&self, invocation_id: Uuid, question: &str) -> TutorReply {
        tracing::info!(question, "processing question");

        let answer = self.answerer.generate_answer(question).await;

        let concepts = self.extractor.extract_concepts(question, &answer).await;
        tracing::debug!(
            question_concepts = ?concepts.question_concepts,
            answer_concepts = ?concepts.answer_concepts,
            "concepts extracted"
        );
        if !concepts.is_sufficient() {
            tracing::info!(outcome = "insufficient_concepts", "pipeline finished");
            let mut reply = TutorReply::new(
                invocation_id,
                answer,
                INSUFFICIENT_CONCEPTS,
                Outcome::InsufficientConcepts,
            );
            reply.concepts = concepts;
            return reply;
        }

        let combined = concepts.combined();
        let relations = self.finder.find_all_relations(&combined).await;
        if relations.is_empty() {
            tracing::info!(outcome = "no_relations", pairs = combined.pair_count(), "pipeline finished");
            let mut reply =
                TutorReply::new(invocation_id, answer, NO_RELATIONS, Outcome::NoRelations);
            reply.concepts = concepts;
            return reply;
        }

        let explanation = self.synthesizer.synthesize(question, &relations).await;
        tracing::info!(outcome = "explained", relations = relations.len(), "pipeline finished");

        let mut reply = TutorReply::new(invocation_id, answer, explanation, Outcome::Explained);
        reply.concepts = concepts;
        reply.relations = relations;
        reply
    }
}
