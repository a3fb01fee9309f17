//! Concept extraction stage: structured LLM output into normalized tokens
//!
//! The model is asked for a JSON object with `question_concepts` and
//! `answer_concepts`. Decoding is lenient: a missing key, a non-array value
//! or a non-string entry contributes nothing instead of failing the run.

use super::concepts::ConceptSet;
use crate::llm::{ChatMessage, ChatRequest, LanguageModel};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::Arc;

/// Pull the concept object out of a model reply.
///
/// JSON mode is not always honored: replies can arrive inside a markdown
/// fence or surrounded by prose. The whole reply is tried first, then the
/// body of the first fence, then the outermost brace span. Only an object
/// is accepted.
pub(crate) fn extract_json(text: &str) -> Option<Value> {
    let reply = text.trim().trim_start_matches('\u{feff}');

    [Some(reply), fenced_body(reply), brace_span(reply)]
        .into_iter()
        .flatten()
        .find_map(|candidate| {
            serde_json::from_str::<Value>(candidate.trim())
                .ok()
                .filter(Value::is_object)
        })
}

/// Text between the first fence and the next one, minus a `json` tag.
fn fenced_body(reply: &str) -> Option<&str> {
    let open = reply.find("```")?;
    let body = &reply[open + 3..];
    let body = body.strip_prefix("json").unwrap_or(body);
    body.find("```").map(|close| &body[..close])
}

fn brace_span(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start < end).then(|| &reply[start..=end])
}

/// Wire shape of the extraction reply, before normalization.
#[derive(Debug, Default, Deserialize)]
struct RawConcepts {
    #[serde(default, deserialize_with = "lenient_phrases")]
    question_concepts: Vec<String>,
    #[serde(default, deserialize_with = "lenient_phrases")]
    answer_concepts: Vec<String>,
}

/// Accept any JSON value; keep only the string entries of an array.
fn lenient_phrases<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Parse a model reply into a normalized concept set.
///
/// Unparseable replies produce an empty set.
pub fn parse_concepts(reply: &str) -> ConceptSet {
    let raw = extract_json(reply)
        .and_then(|v| serde_json::from_value::<RawConcepts>(v).ok())
        .unwrap_or_else(|| {
            let preview: String = reply.chars().take(200).collect();
            tracing::warn!(reply = %preview, "no concept object found in model reply");
            RawConcepts::default()
        });
    ConceptSet::from_phrases(raw.question_concepts, raw.answer_concepts)
}

/// Derives concept tokens from a question and its answer.
pub struct ConceptExtractor {
    model: Arc<dyn LanguageModel>,
}

impl ConceptExtractor {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    fn prompt(question: &str, answer: &str) -> String {
        format!(
            r#"From the following user question and AI answer, extract the most important concepts.
A concept should be one or two words. Return a JSON object with exactly two keys: "question_concepts" and "answer_concepts", each a short list of strings.

Question: "{question}"
Answer: "{answer}"

Output:"#
        )
    }

    /// Never fails: model errors and malformed output yield an empty set,
    /// which the caller treats as insufficient concepts.
    pub async fn extract_concepts(&self, question: &str, answer: &str) -> ConceptSet {
        let request = ChatRequest::new(vec![ChatMessage::user(Self::prompt(question, answer))])
            .with_json_output();

        match self.model.complete(&request).await {
            Ok(reply) => parse_concepts(&reply),
            Err(e) => {
                tracing::warn!(error = %e, "concept extraction failed");
                ConceptSet::default()
            }
        }
    }
}
