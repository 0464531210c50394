//! Semantic similarity: an opaque 0–1 signal blended on top of the keyword score.
//!
//! Default: `TermFrequencyCosine` (pure-Rust, deterministic, no model download).
//! An embedding-backed provider can replace it without touching the keyword engine.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::scoring::tokenize;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been", "but",
        "by", "can", "do", "for", "from", "has", "have", "he", "her", "his", "i", "if", "in",
        "into", "is", "it", "its", "me", "my", "no", "not", "of", "on", "or", "our", "she", "so",
        "such", "that", "the", "their", "then", "there", "these", "they", "this", "to", "us",
        "was", "we", "were", "will", "with", "you", "your",
    ]
    .into_iter()
    .collect()
});

/// Similarity backend. Carried in `AppState` as `Arc<dyn SemanticSimilarityProvider>`.
pub trait SemanticSimilarityProvider: Send + Sync {
    /// Returns a similarity in [0, 1]; 0 when either side is empty.
    fn similarity(&self, resume_terms: &[String], job_terms: &[String]) -> f64;

    /// Short backend label, reported alongside scores.
    fn backend(&self) -> &'static str;
}

/// Content terms of a document: tokens minus stop words and single characters,
/// first occurrence order, no duplicates.
pub fn extract_terms(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|t| t.chars().count() > 1 && !STOP_WORDS.contains(t.as_str()))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Cosine similarity over term-count vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermFrequencyCosine;

impl SemanticSimilarityProvider for TermFrequencyCosine {
    fn similarity(&self, resume_terms: &[String], job_terms: &[String]) -> f64 {
        if resume_terms.is_empty() || job_terms.is_empty() {
            return 0.0;
        }

        let resume = term_counts(resume_terms);
        let job = term_counts(job_terms);

        let dot: f64 = resume
            .iter()
            .filter_map(|(term, &a)| job.get(term).map(|&b| a * b))
            .sum();

        let denominator = norm(&resume) * norm(&job);
        if denominator == 0.0 {
            return 0.0;
        }
        (dot / denominator).clamp(0.0, 1.0)
    }

    fn backend(&self) -> &'static str {
        "term_frequency_cosine"
    }
}

fn norm(counts: &HashMap<&str, f64>) -> f64 {
    counts.values().map(|c| c * c).sum::<f64>().sqrt()
}

fn term_counts(terms: &[String]) -> HashMap<&str, f64> {
    let mut counts = HashMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0.0) += 1.0;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_extract_terms_drops_stop_words_and_duplicates() {
        assert_eq!(
            extract_terms("We are looking for a Rust engineer. Rust, Kafka & a C compiler!"),
            vec!["looking", "rust", "engineer", "kafka", "compiler"]
        );
    }

    #[test]
    fn test_identical_terms_score_one() {
        let t = terms(&["rust", "kafka", "aws"]);
        let score = TermFrequencyCosine.similarity(&t, &t);
        assert!((score - 1.0).abs() < 1e-12, "Score was {score}");
    }

    #[test]
    fn test_disjoint_terms_score_zero() {
        let score = TermFrequencyCosine.similarity(&terms(&["rust"]), &terms(&["cooking"]));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // one shared term out of two on each side → 1 / (√2 · √2) = 0.5
        let score =
            TermFrequencyCosine.similarity(&terms(&["rust", "go"]), &terms(&["rust", "java"]));
        assert!((score - 0.5).abs() < 1e-12, "Score was {score}");
    }

    #[test]
    fn test_empty_side_scores_zero() {
        assert_eq!(TermFrequencyCosine.similarity(&[], &terms(&["rust"])), 0.0);
        assert_eq!(TermFrequencyCosine.similarity(&terms(&["rust"]), &[]), 0.0);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = terms(&["rust", "kafka", "aws", "terraform"]);
        let b = terms(&["kafka", "aws", "python"]);
        let ab = TermFrequencyCosine.similarity(&a, &b);
        let ba = TermFrequencyCosine.similarity(&b, &a);
        assert!((ab - ba).abs() < 1e-12);
    }
}
