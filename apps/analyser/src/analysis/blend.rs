use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::scoring::round2;

/// Share of required skills in the AI skill score when nice-to-have skills exist.
const REQUIRED_SHARE: f64 = 0.8;
const NICE_TO_HAVE_SHARE: f64 = 0.2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Fraction of the keyword ratio kept regardless of semantic similarity.
    pub keyword_floor: f64,
    /// Fraction of the keyword ratio scaled by semantic similarity.
    pub semantic_share: f64,
    /// Weight of the deterministic score when an AI skill score is available.
    pub deterministic_share: f64,
    pub ai_share: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword_floor: 0.6,
            semantic_share: 0.4,
            deterministic_share: 0.6,
            ai_share: 0.4,
        }
    }
}

/// Strict skill match between AI-extracted résumé skills and job requirements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    /// 0 – 100, rounded to 2 decimals.
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Deterministic score on a 0–100 scale: keyword_ratio × (floor + share × semantic) × 100.
pub fn keyword_semantic_score(keyword_ratio: f64, semantic: f64, weights: &ScoringWeights) -> f64 {
    keyword_ratio * (weights.keyword_floor + weights.semantic_share * semantic) * 100.0
}

/// Case-insensitive set match. Required skills count for 80% and nice-to-have skills for 20%
/// when any nice-to-have skills are listed; otherwise required skills are the whole score.
/// Without required skills there is nothing to score.
pub fn skill_match_score(
    resume_skills: &[String],
    required: &[String],
    nice_to_have: &[String],
) -> SkillMatch {
    let normalize = |skills: &[String]| -> BTreeSet<String> {
        skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    };
    let resume = normalize(resume_skills);
    let required = normalize(required);
    let nice = normalize(nice_to_have);

    if required.is_empty() {
        return SkillMatch::default();
    }

    let (required_hits, missing): (Vec<String>, Vec<String>) =
        required.iter().cloned().partition(|skill| resume.contains(skill));
    let nice_hits: Vec<String> = nice.iter().filter(|s| resume.contains(*s)).cloned().collect();

    let required_pct = required_hits.len() as f64 / required.len() as f64 * 100.0;
    let score = if nice.is_empty() {
        required_pct
    } else {
        let nice_pct = nice_hits.len() as f64 / nice.len() as f64 * 100.0;
        required_pct * REQUIRED_SHARE + nice_pct * NICE_TO_HAVE_SHARE
    };

    let mut matched = required_hits;
    matched.extend(nice_hits);

    SkillMatch {
        score: round2(score),
        matched,
        missing,
    }
}

/// Blends the deterministic score with the AI skill score, both on a 0–100 scale.
pub fn blend_scores(deterministic: f64, ai: Option<f64>, weights: &ScoringWeights) -> f64 {
    match ai {
        Some(ai) => deterministic * weights.deterministic_share + ai * weights.ai_share,
        None => deterministic,
    }
}
