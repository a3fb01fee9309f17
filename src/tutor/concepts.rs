//! Concept tokens and the sets built from them

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Joins the words of a multi-word phrase inside a token.
pub const TOKEN_JOINER: &str = "_";

/// Normalize an extracted phrase into a graph lookup key.
///
/// Lower-cases and collapses every run of whitespace into a single `_`.
/// Returns `None` for phrases with no visible content.
pub fn normalize_phrase(phrase: &str) -> Option<String> {
    let words: Vec<String> = phrase
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect();
    if words.is_empty() {
        return None;
    }
    Some(words.join(TOKEN_JOINER))
}

/// Concepts extracted from one question/answer pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptSet {
    pub question_concepts: Vec<String>,
    pub answer_concepts: Vec<String>,
}

impl ConceptSet {
    /// Build from raw phrases, normalizing each and dropping blanks.
    pub fn from_phrases<Q, A>(question: Q, answer: A) -> Self
    where
        Q: IntoIterator,
        Q::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            question_concepts: question
                .into_iter()
                .filter_map(|p| normalize_phrase(p.as_ref()))
                .collect(),
            answer_concepts: answer
                .into_iter()
                .filter_map(|p| normalize_phrase(p.as_ref()))
                .collect(),
        }
    }

    /// Both sides need at least one concept to relate anything.
    pub fn is_sufficient(&self) -> bool {
        !self.question_concepts.is_empty() && !self.answer_concepts.is_empty()
    }

    pub fn combined(&self) -> CombinedConceptSet {
        CombinedConceptSet::from_tokens(
            self.question_concepts
                .iter()
                .chain(self.answer_concepts.iter())
                .cloned(),
        )
    }
}

/// Duplicate-free union of question and answer concepts.
///
/// Membership is a set; iteration follows first appearance so pair
/// enumeration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombinedConceptSet {
    tokens: Vec<String>,
}

impl CombinedConceptSet {
    pub fn from_tokens(tokens: impl IntoIterator<Item = String>) -> Self {
        let mut seen = HashSet::new();
        let tokens = tokens
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of unordered pairs: n·(n−1)/2.
    pub fn pair_count(&self) -> usize {
        let n = self.tokens.len();
        n * n.saturating_sub(1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_joins() {
        assert_eq!(normalize_phrase("UV Rays").as_deref(), Some("uv_rays"));
        assert_eq!(normalize_phrase("  Skin  ").as_deref(), Some("skin"));
        assert_eq!(
            normalize_phrase("Vitamin\tD  Levels").as_deref(),
            Some("vitamin_d_levels")
        );
        assert_eq!(normalize_phrase("   "), None);
        assert_eq!(normalize_phrase(""), None);
    }

    #[test]
    fn tokens_are_lowercase_without_spaces() {
        let set = ConceptSet::from_phrases(
            ["Sunscreen", "Sun Burn"],
            ["Skin Cancer", " UV  radiation ", ""],
        );
        for token in set.question_concepts.iter().chain(&set.answer_concepts) {
            assert_eq!(token, &token.to_lowercase());
            assert!(!token.contains(' '), "token {:?} contains a space", token);
        }
        assert_eq!(set.answer_concepts, vec!["skin_cancer", "uv_radiation"]);
    }

    #[test]
    fn sufficiency_needs_both_sides() {
        assert!(!ConceptSet::default().is_sufficient());
        assert!(!ConceptSet::from_phrases(["sun"], Vec::<&str>::new()).is_sufficient());
        assert!(!ConceptSet::from_phrases(Vec::<&str>::new(), ["skin"]).is_sufficient());
        assert!(ConceptSet::from_phrases(["sun"], ["skin"]).is_sufficient());
    }

    #[test]
    fn combined_removes_duplicates_in_first_seen_order() {
        let set = ConceptSet::from_phrases(["sunscreen", "sun"], ["skin", "Sun", "uv rays"]);
        let combined = set.combined();
        let tokens: Vec<&str> = combined.iter().collect();
        assert_eq!(tokens, vec!["sunscreen", "sun", "skin", "uv_rays"]);
        assert_eq!(combined.pair_count(), 6);
    }

    #[test]
    fn pair_count_of_small_sets() {
        assert_eq!(CombinedConceptSet::default().pair_count(), 0);
        assert_eq!(
            CombinedConceptSet::from_tokens(["a".to_string()]).pair_count(),
            0
        );
        assert_eq!(
            CombinedConceptSet::from_tokens(["a", "b", "c"].map(String::from)).pair_count(),
            3
        );
    }
}
