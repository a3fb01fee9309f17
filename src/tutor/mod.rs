//! Commonsense grounding pipeline
//!
//! Stages, in order: answer generation, concept extraction, pairwise
//! relation discovery, explanation synthesis. `Tutor` sequences them and
//! supplies fallback text whenever a stage comes back short.

mod answer;
mod concepts;
mod extract;
mod orchestrator;
mod relations;
mod synthesize;

pub use answer::{AnswerGenerator, ANSWER_UNAVAILABLE, TUTOR_FRAMING};
pub use concepts::{normalize_phrase, CombinedConceptSet, ConceptSet, TOKEN_JOINER};
pub use extract::{parse_concepts, ConceptExtractor};
pub use orchestrator::{
    Outcome, Tutor, TutorError, TutorReply, INSUFFICIENT_CONCEPTS, NO_RELATIONS,
    PROMPT_FOR_QUESTION,
};
pub use relations::{dedup_edges, unordered_pairs, RelationEdge, RelationFinder};
pub use synthesize::{ExplanationSynthesizer, EXPLANATION_UNAVAILABLE, NO_RELATIONSHIPS_TO_EXPLAIN};
