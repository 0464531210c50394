mod analysis;
mod catalog;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod pdf;
mod routes;
mod scoring;
mod semantic;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::blend::ScoringWeights;
use crate::catalog::{FileCatalogLoader, KeywordCatalogLoader};
use crate::config::Config;
use crate::extraction::{LlmSkillExtractor, StructuredSkillExtractor};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::semantic::{SemanticSimilarityProvider, TermFrequencyCosine};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyser v{}", env!("CARGO_PKG_VERSION"));

    let catalogs = Arc::new(FileCatalogLoader::new(config.keywords_dirs.clone()));
    let categories = catalogs.categories();
    if categories.is_empty() {
        warn!(
            "No keyword catalogs found in {:?}; only extra keywords will be scored",
            config.keywords_dirs
        );
    } else {
        info!("Keyword catalogs: {}", categories.join(", "));
    }

    let semantic = Arc::new(TermFrequencyCosine);
    info!("Semantic similarity backend: {}", semantic.backend());

    let skill_extractor: Option<Arc<dyn StructuredSkillExtractor>> =
        match config.anthropic_api_key.clone() {
            Some(key) => {
                let llm = LlmClient::new(key)?;
                info!("AI skill extraction enabled (model: {})", llm_client::MODEL);
                Some(Arc::new(LlmSkillExtractor(llm)))
            }
            None => {
                warn!("ANTHROPIC_API_KEY not set; AI skill extraction disabled");
                None
            }
        };

    let state = AppState {
        config: config.clone(),
        catalogs,
        semantic,
        skill_extractor,
        weights: ScoringWeights::default(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
