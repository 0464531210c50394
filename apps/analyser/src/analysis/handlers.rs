//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use crate::analysis::{run_analysis, AnalysisReport, AnalysisRequest};
use crate::errors::AppError;
use crate::pdf::extract_pdf_text;
use crate::state::AppState;

const MISSING_INPUT: &str = "Please provide both Resume and Job Description.";

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub default_category: String,
}

/// Raw upload form. A non-empty PDF takes precedence over the matching textarea.
#[derive(Debug, Default)]
struct UploadForm {
    resume_pdf: Option<Bytes>,
    jobdesc_pdf: Option<Bytes>,
    resume_textarea: String,
    jobdesc_textarea: String,
    category: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "resume_pdf" => {
                    form.resume_pdf = non_empty(field.bytes().await.map_err(multipart_error)?)
                }
                "jobdesc_pdf" => {
                    form.jobdesc_pdf = non_empty(field.bytes().await.map_err(multipart_error)?)
                }
                "resume_textarea" => {
                    form.resume_textarea = field.text().await.map_err(multipart_error)?
                }
                "jobdesc_textarea" => {
                    form.jobdesc_textarea = field.text().await.map_err(multipart_error)?
                }
                "jobdesc_category" => {
                    form.category = Some(field.text().await.map_err(multipart_error)?)
                }
                other => debug!("Ignoring unknown form field '{other}'"),
            }
        }

        Ok(form)
    }

    fn is_empty(&self) -> bool {
        self.resume_pdf.is_none()
            && self.jobdesc_pdf.is_none()
            && self.resume_textarea.trim().is_empty()
            && self.jobdesc_textarea.trim().is_empty()
    }

    async fn into_request(self) -> AnalysisRequest {
        let resume_text = match self.resume_pdf {
            Some(pdf) => extract_pdf_text(pdf).await,
            None => self.resume_textarea,
        };
        let job_text = match self.jobdesc_pdf {
            Some(pdf) => extract_pdf_text(pdf).await,
            None => self.jobdesc_textarea,
        };

        AnalysisRequest {
            resume_text,
            job_text,
            category: self.category,
        }
    }
}

fn non_empty(bytes: Bytes) -> Option<Bytes> {
    (!bytes.is_empty()).then_some(bytes)
}

fn multipart_error(e: MultipartError) -> AppError {
    AppError::UnprocessableEntity(e.body_text())
}

/// POST /api/v1/analyse
///
/// Scores pasted résumé text against pasted job description text.
pub async fn handle_analyse(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    if request.resume_text.trim().is_empty() && request.job_text.trim().is_empty() {
        return Err(AppError::Validation(MISSING_INPUT.to_string()));
    }

    let report = run_analysis(&state, request).await?;
    Ok(Json(report))
}

/// POST /api/v1/analyse/upload
///
/// Multipart form with optional PDFs (`resume_pdf`, `jobdesc_pdf`), textareas
/// (`resume_textarea`, `jobdesc_textarea`) and `jobdesc_category`.
pub async fn handle_analyse_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let form = UploadForm::read(multipart).await?;
    if form.is_empty() {
        return Err(AppError::Validation(MISSING_INPUT.to_string()));
    }

    let request = form.into_request().await;
    let report = run_analysis(&state, request).await?;
    Ok(Json(report))
}

/// GET /api/v1/categories
pub async fn handle_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let catalogs = state.catalogs.clone();
    let categories = tokio::task::spawn_blocking(move || catalogs.categories()).await?;

    Ok(Json(CategoriesResponse {
        categories,
        default_category: state.config.default_category.clone(),
    }))
}
