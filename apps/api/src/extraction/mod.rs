//! Résumé text extraction: turns an uploaded PDF, DOCX or text file into plain text.
//!
//! PDF parsing is CPU-bound and may panic on malformed input, so it runs inside
//! `tokio::task::spawn_blocking` behind `catch_unwind`.

use thiserror::Error;
use tracing::{debug, info};

use crate::models::upload::UploadedFile;

pub mod docx;
pub mod pdf;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const LEGACY_DOC_MIME: &str = "application/msword";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    Unsupported(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("no extractable text")]
    NoText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    LegacyDoc,
    PlainText,
}

/// Detects the document kind from content type, extension and magic bytes.
pub fn detect_kind(file: &UploadedFile) -> FileKind {
    let mime = file.mime();
    let ext = file.extension();
    let ext = ext.as_deref();
    let bytes = file.bytes.as_ref();

    if mime == "application/pdf" || ext == Some("pdf") || bytes.starts_with(b"%PDF") {
        FileKind::Pdf
    } else if mime == DOCX_MIME || ext == Some("docx") || bytes.starts_with(b"PK\x03\x04") {
        FileKind::Docx
    } else if mime == LEGACY_DOC_MIME
        || ext == Some("doc")
        || bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0])
    {
        FileKind::LegacyDoc
    } else {
        FileKind::PlainText
    }
}

/// Extracts trimmed, LF-normalised text from an uploaded résumé.
pub async fn extract_resume_text(file: &UploadedFile) -> Result<String, ExtractError> {
    let kind = detect_kind(file);
    info!(
        "Extracting resume text: file={} type={} size={} kind={:?}",
        file.file_name,
        file.mime(),
        file.len(),
        kind
    );

    let raw = match kind {
        FileKind::Pdf => {
            let bytes = file.bytes.clone();
            tokio::task::spawn_blocking(move || pdf::extract_pdf_text(&bytes))
                .await
                .map_err(|e| ExtractError::Pdf(format!("extraction task failed: {e}")))??
        }
        FileKind::Docx => docx::extract_docx_text(&file.bytes)?,
        FileKind::LegacyDoc => {
            return Err(ExtractError::Unsupported(
                "legacy Word .doc files are not supported, save the file as .docx".to_string(),
            ))
        }
        FileKind::PlainText => decode_plain_text(&file.bytes)?,
    };

    let text = normalize_text(&raw);
    if !text.chars().any(char::is_alphanumeric) {
        return Err(ExtractError::NoText);
    }

    debug!("Extracted {} chars of resume text", text.len());
    Ok(text)
}

fn decode_plain_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = String::from_utf8_lossy(bytes);
    let total = text.chars().count().max(1);
    let bad = text
        .chars()
        .filter(|&c| c == '\u{FFFD}' || (c.is_control() && !c.is_whitespace()))
        .count();
    // More than 10% replacement or control characters means this is not text.
    if bad * 10 > total {
        return Err(ExtractError::Unsupported("binary file".to_string()));
    }
    Ok(text.trim_start_matches('\u{FEFF}').to_string())
}

/// CRLF to LF, trailing whitespace per line removed, runs of blank lines
/// collapsed to one, outer whitespace trimmed.
pub fn normalize_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(unified.len());
    let mut blank_run = 0;
    for line in unified.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}
