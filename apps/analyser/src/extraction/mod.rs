//! Structured extraction: AI-assisted skills/experience/education extraction for both documents.
//!
//! `AppState` holds an optional `Arc<dyn StructuredSkillExtractor>`; when it is absent or a
//! call fails, analysis continues on the deterministic score alone.

pub mod models;
pub mod prompts;

use async_trait::async_trait;

use crate::extraction::models::{JobDescriptionData, ResumeData};
use crate::extraction::prompts::{JD_EXTRACT_PROMPT, RESUME_EXTRACT_PROMPT};
use crate::llm_client::prompts::{truncate_document, JSON_ONLY_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

/// Implement this to swap extraction backends without touching the analysis pipeline.
#[async_trait]
pub trait StructuredSkillExtractor: Send + Sync {
    async fn extract_resume(&self, text: &str) -> Result<ResumeData, LlmError>;

    async fn extract_job_description(&self, text: &str) -> Result<JobDescriptionData, LlmError>;
}

/// Extraction through the shared `LlmClient`.
pub struct LlmSkillExtractor(pub LlmClient);

#[async_trait]
impl StructuredSkillExtractor for LlmSkillExtractor {
    async fn extract_resume(&self, text: &str) -> Result<ResumeData, LlmError> {
        let prompt = RESUME_EXTRACT_PROMPT.replace("{resume_text}", truncate_document(text));
        self.0.call_json(&prompt, JSON_ONLY_SYSTEM).await
    }

    async fn extract_job_description(&self, text: &str) -> Result<JobDescriptionData, LlmError> {
        let prompt = JD_EXTRACT_PROMPT.replace("{jd_text}", truncate_document(text));
        self.0.call_json(&prompt, JSON_ONLY_SYSTEM).await
    }
}
