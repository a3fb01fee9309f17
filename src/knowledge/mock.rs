//! Mock knowledge graph for testing

use super::{ConceptUri, GraphEdge, GraphError, KnowledgeGraph};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Canned edges keyed by (start token, end token).
///
/// Pairs without an entry return no edges. Every query is recorded with
/// its start token, end token and requested limit.
pub struct MockGraph {
    edges: HashMap<(String, String), Vec<GraphEdge>>,
    failures: HashSet<(String, String)>,
    fail_all: bool,
    queries: Mutex<Vec<(String, String, usize)>>,
}

impl MockGraph {
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
            failures: HashSet::new(),
            fail_all: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// A graph whose every query fails with a transport error.
    pub fn unreachable() -> Self {
        Self {
            fail_all: true,
            ..Self::new()
        }
    }

    /// Register one directed edge `start --relation--> end`.
    pub fn with_edge(mut self, start: &str, relation: &str, end: &str) -> Self {
        let edge = GraphEdge::new(
            relation,
            &ConceptUri::new("en", start),
            &ConceptUri::new("en", end),
        );
        self.edges
            .entry((start.to_string(), end.to_string()))
            .or_default()
            .push(edge);
        self
    }

    /// Make queries for one directed pair fail.
    pub fn with_failure(mut self, start: &str, end: &str) -> Self {
        self.failures.insert((start.to_string(), end.to_string()));
        self
    }

    /// `(start, end)` of every query received so far, in order.
    pub fn queries(&self) -> Vec<(String, String)> {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(start, end, _)| (start.clone(), end.clone()))
            .collect()
    }

    /// The `limit` passed with every query, in order.
    pub fn limits(&self) -> Vec<usize> {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, _, limit)| *limit)
            .collect()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for MockGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KnowledgeGraph for MockGraph {
    async fn query(
        &self,
        start: &ConceptUri,
        end: &ConceptUri,
        limit: usize,
    ) -> Result<Vec<GraphEdge>, GraphError> {
        let key = (start.token().to_string(), end.token().to_string());
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((key.0.clone(), key.1.clone(), limit));

        if self.fail_all || self.failures.contains(&key) {
            return Err(GraphError::Transport(format!(
                "mock failure for {} -> {}",
                start, end
            )));
        }

        Ok(self
            .edges
            .get(&key)
            .map(|edges| edges.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_registered_edges_up_to_limit() {
        let graph = MockGraph::new()
            .with_edge("sun", "RelatedTo", "heat")
            .with_edge("sun", "Causes", "heat")
            .with_edge("sun", "AtLocation", "heat");

        let edges = graph
            .query(&ConceptUri::new("en", "sun"), &ConceptUri::new("en", "heat"), 2)
            .await
            .unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].relation, "RelatedTo");
        assert_eq!(graph.limits(), vec![2]);
    }

    #[tokio::test]
    async fn edges_are_directed() {
        let graph = MockGraph::new().with_edge("sun", "RelatedTo", "heat");

        let reverse = graph
            .query(&ConceptUri::new("en", "heat"), &ConceptUri::new("en", "sun"), 2)
            .await
            .unwrap();
        assert!(reverse.is_empty());
        assert_eq!(graph.queries(), vec![("heat".to_string(), "sun".to_string())]);
    }

    #[tokio::test]
    async fn configured_failures_error() {
        let graph = MockGraph::new().with_failure("a", "b");
        let result = graph
            .query(&ConceptUri::new("en", "a"), &ConceptUri::new("en", "b"), 2)
            .await;
        assert!(matches!(result, Err(GraphError::Transport(_))));
    }
}
