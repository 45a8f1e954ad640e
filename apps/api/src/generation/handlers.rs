//! Axum route handlers for résumé generation and formatting.

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::extract_resume_text;
use crate::formatter::format_resume_as_html;
use crate::generation::generator::{
    tailor_resume, validate_inputs, TailoredOutput, FILE_FLOW_MINIMUMS, TEXT_FLOW_MINIMUMS,
};
use crate::job_posting::resolve_job_description;
use crate::models::resume::{now_timestamp, GenerateResponse, API_VERSION};
use crate::routes::form::{
    read_upload_form, JOB_DESCRIPTION_FIELD, JOB_URL_FIELD, RESUME_TEXT_FIELD,
};
use crate::state::AppState;

pub const MISSING_FILE_FLOW_FIELDS: &str =
    "Missing required fields: jobUrl and resume file are required";
pub const MISSING_TEXT_FLOW_FIELDS: &str = "Missing job description or resume text";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body of `/api/simple-generate` when sent as JSON or urlencoded.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleGenerateRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatResponse {
    pub success: bool,
    pub generated_resume: String,
    pub original_length: usize,
    pub api_version: &'static str,
    pub timestamp: String,
}

fn generate_response(
    output: TailoredOutput,
    job_description: &str,
    resume_text: &str,
) -> GenerateResponse {
    GenerateResponse {
        success: true,
        optimized_length: output.html.chars().count(),
        generated_resume: output.html,
        explanation: output.explanation,
        original_length: resume_text.chars().count(),
        job_description_length: job_description.chars().count(),
        api_version: API_VERSION,
        timestamp: now_timestamp(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-resume
///
/// Multipart `resume` file plus `jobUrl`, which may be a posting URL or the
/// pasted posting itself. Scraping and text extraction run concurrently.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let span = info_span!("generate_resume", request_id = %Uuid::new_v4());

    async move {
        let mut form = read_upload_form(multipart, state.config.max_upload_bytes).await?;
        let job_input = form.text(JOB_URL_FIELD).map(str::to_string);
        let (Some(job_input), Some(file)) = (job_input, form.take_resume()) else {
            return Err(AppError::Validation(MISSING_FILE_FLOW_FIELDS.to_string()));
        };
        info!(
            "Resume generation request: file={} size={}",
            file.file_name,
            file.len()
        );

        let (job_description, resume_text) = tokio::try_join!(
            async {
                resolve_job_description(&job_input, &state.scraper)
                    .await
                    .map_err(AppError::from)
            },
            async { extract_resume_text(&file).await.map_err(AppError::from) },
        )?;
        info!(
            "Inputs resolved: job description {} chars, resume {} chars",
            job_description.len(),
            resume_text.len()
        );

        validate_inputs(&job_description, &resume_text, FILE_FLOW_MINIMUMS)?;

        let output = tailor_resume(state.llm.as_ref(), &job_description, &resume_text).await?;
        info!("Resume generated, html length: {}", output.html.len());

        Ok(Json(generate_response(output, &job_description, &resume_text)))
    }
    .instrument(span)
    .await
}

/// POST /api/simple-generate
///
/// Pasted `jobDescription` and `resumeText`, as multipart, urlencoded or JSON.
pub async fn handle_simple_generate(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<GenerateResponse>, AppError> {
    let span = info_span!("simple_generate", request_id = %Uuid::new_v4());

    async move {
        let input = read_simple_request(&state, request).await?;
        let job_description = input.job_description.trim();
        let resume_text = input.resume_text.trim();
        if job_description.is_empty() || resume_text.is_empty() {
            return Err(AppError::Validation(MISSING_TEXT_FLOW_FIELDS.to_string()));
        }
        info!(
            "Simple generation request: job description {} chars, resume {} chars",
            job_description.len(),
            resume_text.len()
        );

        validate_inputs(job_description, resume_text, TEXT_FLOW_MINIMUMS)?;

        let output = tailor_resume(state.llm.as_ref(), job_description, resume_text).await?;

        Ok(Json(generate_response(output, job_description, resume_text)))
    }
    .instrument(span)
    .await
}

async fn read_simple_request(
    state: &AppState,
    request: Request,
) -> Result<SimpleGenerateRequest, AppError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        let form = read_upload_form(multipart, state.config.max_upload_bytes).await?;
        Ok(SimpleGenerateRequest {
            job_description: form.text(JOB_DESCRIPTION_FIELD).unwrap_or_default().to_string(),
            resume_text: form.text(RESUME_TEXT_FIELD).unwrap_or_default().to_string(),
        })
    } else if content_type.starts_with("application/json") {
        let Json(body) = Json::<SimpleGenerateRequest>::from_request(request, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(body)
    } else {
        let Form(body) = Form::<SimpleGenerateRequest>::from_request(request, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(body)
    }
}

/// POST /api/format-resume
///
/// Formats an uploaded résumé (or pasted `resumeText`) as HTML without any AI call.
pub async fn handle_format_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FormatResponse>, AppError> {
    let mut form = read_upload_form(multipart, state.config.max_upload_bytes).await?;

    let resume_text = match (form.take_resume(), form.text(RESUME_TEXT_FIELD)) {
        (Some(file), _) => extract_resume_text(&file).await?,
        (None, Some(text)) => text.to_string(),
        (None, None) => {
            return Err(AppError::Validation(
                "A resume file or resumeText is required".to_string(),
            ))
        }
    };

    let html = format_resume_as_html(&resume_text);
    info!(
        "Formatted resume without AI: {} chars in, {} chars out",
        resume_text.len(),
        html.len()
    );

    Ok(Json(FormatResponse {
        success: true,
        generated_resume: html,
        original_length: resume_text.chars().count(),
        api_version: API_VERSION,
        timestamp: now_timestamp(),
    }))
}
