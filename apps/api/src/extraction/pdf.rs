//! PDF text extraction via `pdf-extract`, with a raw-byte salvage fallback for
//! files the parser rejects.

use std::panic::{catch_unwind, AssertUnwindSafe};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::ExtractError;

/// Salvaged text shorter than this is treated as unreadable.
const MIN_SALVAGE_CHARS: usize = 50;

/// Blocking. Call from `spawn_blocking`.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let parsed = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)));

    let failure = match parsed {
        Ok(Ok(text)) if text.chars().any(char::is_alphabetic) => return Ok(text),
        Ok(Ok(_)) => "parser returned no text".to_string(),
        Ok(Err(e)) => e.to_string(),
        Err(_) => "parser panicked".to_string(),
    };

    warn!("pdf-extract failed ({failure}), salvaging readable runs from raw bytes");
    salvage_readable_text(bytes).ok_or(ExtractError::Pdf(failure))
}

static RE_PDF_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"PDF-\d+\.\d+|\bobj\s+\d+|\b(?:endobj|endstream|stream|xref|startxref|trailer|CreationDate|ModDate|Producer|Creator)\b",
    )
    .unwrap()
});
static RE_LONG_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{10,}\b").unwrap());
static RE_LONG_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{10,}\b").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn is_readable(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b.is_ascii_whitespace() || b".,;:!?@-+()[]".contains(&b)
}

/// Keeps runs of printable ASCII and strips PDF structure keywords.
/// Only useful for uncompressed content streams. Returns `None` when the result
/// is too short or has no letters.
pub fn salvage_readable_text(bytes: &[u8]) -> Option<String> {
    let mut text = String::with_capacity(bytes.len() / 2);
    let mut run = 0usize;
    for &b in bytes {
        if is_readable(b) {
            text.push(b as char);
            run += 1;
        } else {
            if run > 3 {
                text.push(' ');
            }
            run = 0;
        }
    }

    let text = RE_PDF_TOKENS.replace_all(&text, " ");
    let text = RE_LONG_UPPER.replace_all(&text, " ");
    let text = RE_LONG_DIGITS.replace_all(&text, " ");
    let text = RE_WHITESPACE.replace_all(&text, " ");
    let text = text.trim();

    if text.len() < MIN_SALVAGE_CHARS || !text.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(text.to_string())
}
