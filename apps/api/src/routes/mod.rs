pub mod debug;
pub mod form;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::render::handlers as render;
use crate::state::AppState;

/// Headroom over the file limit for multipart boundaries and text fields.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/debug", get(debug::handle_debug))
        .route("/api/debug-file", post(debug::handle_debug_file))
        // Generation
        .route(
            "/api/generate-resume",
            post(generation::handle_generate_resume),
        )
        .route(
            "/api/simple-generate",
            post(generation::handle_simple_generate),
        )
        .route("/api/format-resume", post(generation::handle_format_resume))
        // Downloads
        .route("/api/generate-pdf", post(render::handle_generate_pdf))
        .route(
            "/api/generate-pdf-preview",
            post(render::handle_generate_pdf_preview),
        )
        .route("/api/generate-docx", post(render::handle_generate_docx))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
