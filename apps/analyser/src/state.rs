use std::sync::Arc;

use crate::analysis::blend::ScoringWeights;
use crate::catalog::KeywordCatalogLoader;
use crate::config::Config;
use crate::extraction::StructuredSkillExtractor;
use crate::semantic::SemanticSimilarityProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Keyword catalogs per job category. Default: FileCatalogLoader over KEYWORDS_DIR.
    pub catalogs: Arc<dyn KeywordCatalogLoader>,
    /// Default: TermFrequencyCosine.
    pub semantic: Arc<dyn SemanticSimilarityProvider>,
    /// None when ANTHROPIC_API_KEY is not configured.
    pub skill_extractor: Option<Arc<dyn StructuredSkillExtractor>>,
    pub weights: ScoringWeights,
}
