//! Diagnostics endpoints. Neither touches the AI service.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::llm_client::MODEL;
use crate::models::resume::now_timestamp;
use crate::routes::form::read_upload_form;
use crate::state::AppState;

const PREVIEW_BYTES: usize = 100;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDebugResponse {
    pub file_name: String,
    pub file_type: String,
    pub file_size: usize,
    /// Hex of the first 100 bytes.
    pub first_bytes: String,
}

/// GET /api/debug
pub async fn handle_debug(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Debug endpoint working",
        "timestamp": now_timestamp(),
        "model": MODEL,
        "environment": state.config.app_env,
        "features": {
            "jobScraping": true,
            "pdfExtraction": true,
            "docxExtraction": true,
            "pdfExport": true,
            "docxExport": true,
            "maxUploadBytes": state.config.max_upload_bytes,
        }
    }))
}

pub fn hex_prefix(bytes: &[u8], limit: usize) -> String {
    hex::encode(&bytes[..bytes.len().min(limit)])
}

/// POST /api/debug-file
pub async fn handle_debug_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FileDebugResponse>, AppError> {
    let mut form = read_upload_form(multipart, state.config.max_upload_bytes).await?;
    let file = form
        .take_resume()
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    Ok(Json(FileDebugResponse {
        file_type: file.mime().to_string(),
        file_size: file.len(),
        first_bytes: hex_prefix(&file.bytes, PREVIEW_BYTES),
        file_name: file.file_name,
    }))
}
