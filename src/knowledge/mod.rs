//! Knowledge-graph capability: direct edge lookup between two concepts
//!
//! Two implementations:
//! - `ConceptNetClient`: ConceptNet `/query` endpoint over HTTP
//! - `MockGraph`: canned edges per concept pair (testing)

mod conceptnet;
mod mock;

pub use conceptnet::ConceptNetClient;
pub use mock::MockGraph;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A concept identifier in graph URI form: `/c/<lang>/<token>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConceptUri(String);

impl ConceptUri {
    pub fn new(language: &str, token: &str) -> Self {
        Self(format!("/c/{}/{}", language, token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The token segment (everything after `/c/<lang>/`).
    pub fn token(&self) -> &str {
        self.0.splitn(4, '/').nth(3).unwrap_or_default()
    }
}

impl std::fmt::Display for ConceptUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One edge returned by the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Human-readable relation label, e.g. `UsedFor`
    pub relation: String,
    /// Start node URI as reported by the graph
    pub start: String,
    /// End node URI as reported by the graph
    pub end: String,
    pub weight: f64,
}

impl GraphEdge {
    pub fn new(relation: impl Into<String>, start: &ConceptUri, end: &ConceptUri) -> Self {
        Self {
            relation: relation.into(),
            start: start.to_string(),
            end: end.to_string(),
            weight: 1.0,
        }
    }
}

/// Errors from knowledge-graph lookups.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("graph service returned {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Client trait for direct edge lookup.
#[async_trait]
pub trait KnowledgeGraph: Send + Sync {
    /// Edges from `start` to `end`, at most `limit` of them, in service order.
    async fn query(
        &self,
        start: &ConceptUri,
        end: &ConceptUri,
        limit: usize,
    ) -> Result<Vec<GraphEdge>, GraphError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_is_language_scoped() {
        let uri = ConceptUri::new("en", "uv_rays");
        assert_eq!(uri.as_str(), "/c/en/uv_rays");
        assert_eq!(uri.token(), "uv_rays");
    }
}
