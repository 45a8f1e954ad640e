//! Downloadable résumé documents: PDF via printpdf, DOCX as a hand-written
//! OOXML package.

use thiserror::Error;

pub mod docx;
pub mod handlers;
pub mod pdf;

pub use self::docx::render_docx;
pub use self::pdf::render_pdf;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("DOCX packaging failed: {0}")]
    Docx(#[from] zip::result::ZipError),

    #[error("I/O error while writing document: {0}")]
    Io(#[from] std::io::Error),
}

impl From<printpdf::Error> for RenderError {
    fn from(e: printpdf::Error) -> Self {
        RenderError::Pdf(e.to_string())
    }
}

/// `data:` URI for inline PDF previews.
pub fn pdf_data_uri(bytes: &[u8]) -> String {
    let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, bytes);
    format!("data:application/pdf;base64,{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_data_uri() {
        assert_eq!(pdf_data_uri(b"%PDF"), "data:application/pdf;base64,JVBERg==");
    }
}
