use serde::{Deserialize, Serialize};

use crate::scoring::context::MissingKeywordContext;
use crate::scoring::keywords::KeywordWeightMap;

/// One slot per weight class: weight 1 (OTHER) → slot 0 … weight 4 (SKILLS) → slot 3.
pub const WEIGHT_TIERS: usize = 4;

/// Deterministic keyword score for one résumé / job pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Σ matched weights / Σ job weights, unrounded, 0–1.
    pub keyword_ratio: f64,
    /// Matched weight as a percentage of job weight, per tier, rounded to 2 decimals.
    pub tier_scores: [f64; WEIGHT_TIERS],
    /// Matched keyword count / job keyword count, 0–1.
    pub density: f64,
    pub jd_keywords: KeywordWeightMap,
    pub matched_keywords: KeywordWeightMap,
    pub missing_keywords: MissingKeywordContext,
}

#[derive(Debug, Default)]
struct TierTotals {
    per_tier: [f64; WEIGHT_TIERS],
    total: f64,
}

impl TierTotals {
    fn from_weights(weights: &KeywordWeightMap) -> Self {
        let mut totals = Self::default();
        for &weight in weights.values() {
            if let Some(slot) = tier_slot(weight) {
                totals.per_tier[slot] += f64::from(weight);
            }
            totals.total += f64::from(weight);
        }
        totals
    }
}

fn tier_slot(weight: u8) -> Option<usize> {
    (weight as usize)
        .checked_sub(1)
        .filter(|&slot| slot < WEIGHT_TIERS)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Folds the job and matched keyword maps into per-tier and overall ratios.
/// Every denominator is floored at 1, so empty inputs score 0 instead of dividing by zero.
pub fn aggregate(
    jd_keywords: KeywordWeightMap,
    matched_keywords: KeywordWeightMap,
    missing_keywords: MissingKeywordContext,
) -> ScoreBreakdown {
    let jd = TierTotals::from_weights(&jd_keywords);
    let matched = TierTotals::from_weights(&matched_keywords);

    let tier_scores = std::array::from_fn(|slot| {
        round2(matched.per_tier[slot] / jd.per_tier[slot].max(1.0) * 100.0)
    });

    ScoreBreakdown {
        keyword_ratio: matched.total / jd.total.max(1.0),
        tier_scores,
        density: matched_keywords.len() as f64 / jd_keywords.len().max(1) as f64,
        jd_keywords,
        matched_keywords,
        missing_keywords,
    }
}
