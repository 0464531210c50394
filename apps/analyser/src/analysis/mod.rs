//! Analysis pipeline: the deterministic keyword score blended with the optional AI skill
//! match into one report.
//!
//! Catalog loading, segmentation and scoring are CPU-bound and run on the blocking pool while
//! the two AI extraction calls run concurrently on the runtime.

pub mod blend;
pub mod handlers;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::blend::{blend_scores, keyword_semantic_score, skill_match_score, SkillMatch};
use crate::catalog::KeywordCatalogLoader;
use crate::errors::AppError;
use crate::extraction::models::{JobDescriptionData, ResumeData};
use crate::extraction::StructuredSkillExtractor;
use crate::scoring::context::MissingKeywordContext;
use crate::scoring::keywords::KeywordWeightMap;
use crate::scoring::{round2, score_sections, segment, ScoreBreakdown, SectionedText};
use crate::semantic::{extract_terms, SemanticSimilarityProvider};
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_text: String,
    /// Keyword catalog to score against; the configured default when omitted.
    #[serde(default)]
    pub category: Option<String>,
}

/// Full analysis returned to callers. Scores are percentages rounded to 2 decimals.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub analysed_at: DateTime<Utc>,
    pub category: String,
    /// Final blended score, 0 – 100.
    pub score: f64,
    pub keyword_score: f64,
    pub semantic_score: f64,
    pub semantic_backend: String,
    pub density: f64,
    /// Per weight class: OTHER, EDUCATION, EXPERIENCE, SKILLS.
    pub section_scores: [f64; 4],
    pub resume_sections: SectionedText,
    pub jd_keywords: KeywordWeightMap,
    pub matched_keywords: KeywordWeightMap,
    pub missing_keywords: MissingKeywordContext,
    pub ai_resume_data: Option<ResumeData>,
    pub ai_jd_data: Option<JobDescriptionData>,
    pub ai_skill_match: Option<SkillMatch>,
}

/// Everything computed without the network.
#[derive(Debug)]
struct DeterministicScore {
    sections: SectionedText,
    breakdown: ScoreBreakdown,
    semantic: f64,
}

fn score_deterministic(
    catalogs: &dyn KeywordCatalogLoader,
    semantic: &dyn SemanticSimilarityProvider,
    resume_text: &str,
    job_text: &str,
    category: &str,
) -> DeterministicScore {
    let catalog = catalogs.load(category);
    let sections = segment(resume_text);
    let breakdown = score_sections(&sections, job_text, &catalog);
    let semantic = semantic.similarity(&extract_terms(resume_text), &extract_terms(job_text));

    DeterministicScore {
        sections,
        breakdown,
        semantic,
    }
}

/// Runs both extractions concurrently. Failures are logged and treated as absent.
async fn extract_structured(
    extractor: Option<&dyn StructuredSkillExtractor>,
    resume_text: &str,
    job_text: &str,
) -> (Option<ResumeData>, Option<JobDescriptionData>) {
    let Some(extractor) = extractor else {
        return (None, None);
    };

    let resume = async {
        if resume_text.trim().is_empty() {
            return None;
        }
        extractor
            .extract_resume(resume_text)
            .await
            .map_err(|e| warn!("Resume extraction failed: {e}"))
            .ok()
    };
    let job = async {
        if job_text.trim().is_empty() {
            return None;
        }
        extractor
            .extract_job_description(job_text)
            .await
            .map_err(|e| warn!("Job description extraction failed: {e}"))
            .ok()
    };

    tokio::join!(resume, job)
}

fn resolve_category(requested: Option<String>, default: &str) -> String {
    requested
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Scores one résumé against one job description.
///
/// Empty texts are not an error here: they score 0. Callers decide whether a request
/// carries enough input to be worth analysing.
pub async fn run_analysis(
    state: &AppState,
    request: AnalysisRequest,
) -> Result<AnalysisReport, AppError> {
    let category = resolve_category(request.category, &state.config.default_category);
    let resume_text: Arc<str> = Arc::from(request.resume_text);
    let job_text: Arc<str> = Arc::from(request.job_text);

    let deterministic_task = {
        let catalogs = Arc::clone(&state.catalogs);
        let semantic = Arc::clone(&state.semantic);
        let resume_text = Arc::clone(&resume_text);
        let job_text = Arc::clone(&job_text);
        let category = category.clone();
        tokio::task::spawn_blocking(move || {
            score_deterministic(
                catalogs.as_ref(),
                semantic.as_ref(),
                &resume_text,
                &job_text,
                &category,
            )
        })
    };

    let (ai_resume_data, ai_jd_data) =
        extract_structured(state.skill_extractor.as_deref(), &resume_text, &job_text).await;
    let deterministic = deterministic_task.await?;

    let ai_skill_match = match (&ai_resume_data, &ai_jd_data) {
        (Some(resume), Some(jd)) if !resume.skills.is_empty() && !jd.required_skills.is_empty() => {
            Some(skill_match_score(
                &resume.skills,
                &jd.required_skills,
                &jd.nice_to_have_skills,
            ))
        }
        _ => None,
    };

    let breakdown = deterministic.breakdown;
    let deterministic_score =
        keyword_semantic_score(breakdown.keyword_ratio, deterministic.semantic, &state.weights);
    let score = blend_scores(
        deterministic_score,
        ai_skill_match.as_ref().map(|m| m.score),
        &state.weights,
    );

    let report = AnalysisReport {
        analysis_id: Uuid::new_v4(),
        analysed_at: Utc::now(),
        category,
        score: round2(score),
        keyword_score: round2(breakdown.keyword_ratio * 100.0),
        semantic_score: round2(deterministic.semantic * 100.0),
        semantic_backend: state.semantic.backend().to_string(),
        density: round2(breakdown.density * 100.0),
        section_scores: breakdown.tier_scores,
        resume_sections: deterministic.sections,
        jd_keywords: breakdown.jd_keywords,
        matched_keywords: breakdown.matched_keywords,
        missing_keywords: breakdown.missing_keywords,
        ai_resume_data,
        ai_jd_data,
        ai_skill_match,
    };

    info!(
        "Analysis {} [{}]: score {} (keyword {}, semantic {}, ai {:?})",
        report.analysis_id,
        report.category,
        report.score,
        report.keyword_score,
        report.semantic_score,
        report.ai_skill_match.as_ref().map(|m| m.score)
    );

    Ok(report)
}
