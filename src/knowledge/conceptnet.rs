//! ConceptNet HTTP client

use super::{ConceptUri, GraphEdge, GraphError, KnowledgeGraph};
use crate::config::KnowledgeConfig;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub struct ConceptNetClient {
    http: reqwest::Client,
    query_url: String,
}

impl ConceptNetClient {
    pub fn new(config: &KnowledgeConfig) -> Result<Self, GraphError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GraphError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            query_url: format!("{}/query", config.base_url.trim_end_matches('/')),
        })
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    edges: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    rel: RawNode,
    start: RawNode,
    end: RawNode,
    #[serde(default = "default_weight")]
    weight: f64,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(default)]
    label: Option<String>,
}

fn default_weight() -> f64 {
    1.0
}

impl From<RawEdge> for GraphEdge {
    fn from(raw: RawEdge) -> Self {
        // Relation labels fall back to the `/r/<Name>` id tail.
        let relation = raw.rel.label.unwrap_or_else(|| {
            raw.rel
                .id
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string()
        });
        GraphEdge {
            relation,
            start: raw.start.id,
            end: raw.end.id,
            weight: raw.weight,
        }
    }
}

fn parse_edges(body: &str) -> Result<Vec<GraphEdge>, GraphError> {
    let parsed: QueryResponse =
        serde_json::from_str(body).map_err(|e| GraphError::MalformedResponse(e.to_string()))?;
    Ok(parsed.edges.into_iter().map(GraphEdge::from).collect())
}

#[async_trait]
impl KnowledgeGraph for ConceptNetClient {
    async fn query(
        &self,
        start: &ConceptUri,
        end: &ConceptUri,
        limit: usize,
    ) -> Result<Vec<GraphEdge>, GraphError> {
        let limit = limit.to_string();
        let response = self
            .http
            .get(&self.query_url)
            .query(&[
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| GraphError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GraphError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GraphError::Transport(e.to_string()))?;
        parse_edges(&body)
    }
}
