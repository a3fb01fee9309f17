//! grallm: Commonsense-Grounded Tutor
//!
//! Answers "why" questions with a language model, then explains the answer
//! from direct ConceptNet edges between the concepts it mentions.
//!
//! # Pipeline
//!
//! - **Answer**: fluent reply from the language model
//! - **Concepts**: normalized tokens extracted from question and answer
//! - **Relations**: one directed graph lookup per unordered concept pair
//! - **Explanation**: the discovered relations woven into one paragraph
//!
//! Every capability failure degrades to fixed text; `Tutor::run` always
//! returns an answer and an explanation.
//!
//! # Example
//!
//! ```
//! use grallm::{MockGraph, MockModel, Tutor, TutorConfig};
//! use std::sync::Arc;
//!
//! let tutor = Tutor::new(
//!     Arc::new(MockModel::available()),
//!     Arc::new(MockGraph::new()),
//!     &TutorConfig::default(),
//! );
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let (answer, explanation) = rt.block_on(tutor.run("")).into_pair();
//! assert_eq!(answer, "Please enter a question.");
//! assert!(explanation.is_empty());
//! ```

pub mod config;
pub mod knowledge;
pub mod llm;
pub mod tutor;

pub use crate::config::{ConfigError, KnowledgeConfig, LlmConfig, TutorConfig};
pub use knowledge::{ConceptNetClient, ConceptUri, GraphEdge, GraphError, KnowledgeGraph, MockGraph};
pub use llm::{ChatCompletionsClient, ChatMessage, ChatRequest, LanguageModel, LlmError, MockModel, Role};
pub use tutor::{ConceptSet, Outcome, RelationEdge, Tutor, TutorReply};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
