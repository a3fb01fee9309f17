//! Pairwise relation discovery against the knowledge graph
//!
//! Every unordered pair of combined concepts gets exactly one directed
//! lookup (earlier concept → later concept). The reverse direction is not
//! queried, so edges that only exist as later → earlier are missed.
//! Lookups are independent and may run concurrently; results are merged
//! in pair-enumeration order and deduplicated by rendered text, first
//! occurrence winning.

use super::concepts::CombinedConceptSet;
use crate::config::KnowledgeConfig;
use crate::knowledge::{ConceptUri, KnowledgeGraph};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// One discovered commonsense fact between two concepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationEdge {
    pub start: String,
    pub relation: String,
    pub end: String,
}

impl RelationEdge {
    pub fn new(
        start: impl Into<String>,
        relation: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            relation: relation.into(),
            end: end.into(),
        }
    }

    /// Sentence fragment used for dedup and for the synthesis prompt.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for RelationEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" {} \"{}\"", self.start, self.relation, self.end)
    }
}

/// All unordered pairs `(c[i], c[j])` with `i < j`, in enumeration order.
pub fn unordered_pairs(concepts: &CombinedConceptSet) -> Vec<(&str, &str)> {
    let tokens: Vec<&str> = concepts.iter().collect();
    let mut pairs = Vec::with_capacity(concepts.pair_count());
    for i in 0..tokens.len() {
        for j in (i + 1)..tokens.len() {
            pairs.push((tokens[i], tokens[j]));
        }
    }
    pairs
}

/// Keep the first edge of each distinct rendering, preserving order.
pub fn dedup_edges(edges: impl IntoIterator<Item = RelationEdge>) -> Vec<RelationEdge> {
    let mut seen = HashSet::new();
    edges
        .into_iter()
        .filter(|edge| seen.insert(edge.render()))
        .collect()
}

/// Looks up direct edges between concept pairs.
pub struct RelationFinder {
    graph: Arc<dyn KnowledgeGraph>,
    language: String,
    edge_limit: usize,
    concurrency: usize,
}

impl RelationFinder {
    pub fn new(graph: Arc<dyn KnowledgeGraph>, config: &KnowledgeConfig) -> Self {
        Self {
            graph,
            language: config.language.clone(),
            edge_limit: config.edge_limit.max(1),
            concurrency: 1,
        }
    }

    /// Allow up to `limit` lookups in flight. Output order is unaffected.
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    /// First edge from `a` to `b`, if the graph has one.
    ///
    /// Lookup failures are treated the same as "no edge".
    pub async fn find_relation(&self, a: &str, b: &str) -> Option<RelationEdge> {
        let start = ConceptUri::new(&self.language, a);
        let end = ConceptUri::new(&self.language, b);

        match self.graph.query(&start, &end, self.edge_limit).await {
            Ok(edges) => edges
                .into_iter()
                .next()
                .map(|edge| RelationEdge::new(a, edge.relation, b)),
            Err(e) => {
                tracing::debug!(start = %start, end = %end, error = %e, "relation lookup failed");
                None
            }
        }
    }

    /// Query every unordered pair once and return distinct edges in
    /// pair-enumeration order.
    pub async fn find_all_relations(&self, concepts: &CombinedConceptSet) -> Vec<RelationEdge> {
        if concepts.is_empty() {
            tracing::debug!("no concepts to pair");
            return Vec::new();
        }

        let pairs = unordered_pairs(concepts);
        let lookups = pairs.len();

        let found: Vec<RelationEdge> = stream::iter(pairs)
            .map(|(a, b)| self.find_relation(a, b))
            .buffered(self.concurrency)
            .filter_map(|edge| async move { edge })
            .collect()
            .await;

        let edges = dedup_edges(found);
        tracing::debug!(
            concepts = concepts.len(),
            lookups,
            edges = edges.len(),
            "relation search complete"
        );
        edges
    }
}
