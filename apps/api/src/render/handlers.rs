//! Axum route handlers for PDF and DOCX downloads.

use anyhow::anyhow;
use axum::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::formatter::read_html;
use crate::models::resume::ResumeDocument;
use crate::render::{pdf_data_uri, render_docx, render_pdf, RenderError};

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// `{html}`; the preview endpoint sends the same content as `htmlContent`.
#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    #[serde(default, alias = "htmlContent")]
    pub html: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfPreviewResponse {
    pub success: bool,
    pub pdf_data: String,
}

fn document_from_request(request: &DocumentRequest) -> Result<ResumeDocument, AppError> {
    if request.html.trim().is_empty() {
        return Err(AppError::Validation("HTML content is required".to_string()));
    }
    let doc = read_html(&request.html);
    if doc.is_empty() {
        return Err(AppError::Validation(
            "HTML content has no readable resume text".to_string(),
        ));
    }
    debug!(
        "Read {} blocks ({} chars) from {} bytes of HTML",
        doc.blocks.len(),
        doc.char_count(),
        request.html.len()
    );
    Ok(doc)
}

/// Renders off the async runtime; printpdf layout is CPU-bound.
async fn render_blocking<F>(doc: ResumeDocument, render: F) -> Result<Vec<u8>, AppError>
where
    F: FnOnce(&ResumeDocument) -> Result<Vec<u8>, RenderError> + Send + 'static,
{
    let bytes = tokio::task::spawn_blocking(move || render(&doc))
        .await
        .map_err(|e| AppError::Internal(anyhow!("render task failed: {e}")))??;
    Ok(bytes)
}

/// POST /api/generate-pdf
pub async fn handle_generate_pdf(
    Json(request): Json<DocumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let doc = document_from_request(&request)?;
    let bytes = render_blocking(doc, render_pdf).await?;
    info!("Generated PDF download, {} bytes", bytes.len());

    Ok((
        [
            (CONTENT_TYPE, "application/pdf"),
            (CONTENT_DISPOSITION, "attachment; filename=\"resume.pdf\""),
        ],
        bytes,
    ))
}

/// POST /api/generate-pdf-preview
pub async fn handle_generate_pdf_preview(
    Json(request): Json<DocumentRequest>,
) -> Result<Json<PdfPreviewResponse>, AppError> {
    let doc = document_from_request(&request)?;
    let bytes = render_blocking(doc, render_pdf).await?;
    info!("Generated PDF preview, {} bytes", bytes.len());

    Ok(Json(PdfPreviewResponse {
        success: true,
        pdf_data: pdf_data_uri(&bytes),
    }))
}

/// POST /api/generate-docx
pub async fn handle_generate_docx(
    Json(request): Json<DocumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let doc = document_from_request(&request)?;
    let bytes = render_blocking(doc, render_docx).await?;
    info!("Generated DOCX download, {} bytes", bytes.len());

    Ok((
        [
            (CONTENT_TYPE, DOCX_MIME),
            (CONTENT_DISPOSITION, "attachment; filename=\"resume.docx\""),
        ],
        bytes,
    ))
}
