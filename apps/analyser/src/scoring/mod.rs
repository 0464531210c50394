// Deterministic keyword engine.
// Pipeline: segment résumé → job keywords → section matching → missing context → tier aggregation.
// Pure and synchronous; callers on the async runtime run it inside spawn_blocking.

pub mod aggregate;
pub mod context;
pub mod keywords;
pub mod matcher;
pub mod sections;
pub mod tokenizer;

pub use aggregate::{round2, ScoreBreakdown};
pub use keywords::KeywordCatalog;
pub use sections::{segment, SectionedText};
pub use tokenizer::tokenize;

use tracing::debug;

use crate::scoring::aggregate::aggregate;
use crate::scoring::context::extract_missing_context;
use crate::scoring::matcher::match_sections;

/// Scores an already-segmented résumé against the job text.
pub fn score_sections(
    sections: &SectionedText,
    job_text: &str,
    catalog: &KeywordCatalog,
) -> ScoreBreakdown {
    let matches = match_sections(sections, job_text, catalog);
    let job_tokens = tokenize(job_text);
    let missing = extract_missing_context(&matches.jd, &matches.matched, &job_tokens);

    let breakdown = aggregate(matches.jd, matches.matched, missing);
    debug!(
        "Keyword ratio {:.3}, density {:.3}, tiers {:?}",
        breakdown.keyword_ratio, breakdown.density, breakdown.tier_scores
    );
    breakdown
}
