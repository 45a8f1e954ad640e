//! Job posting input: classifies the `jobUrl` form field as a URL or pasted
//! text and resolves it to a plain-text job description.

use thiserror::Error;
use tracing::info;

pub mod fetch;

pub use self::fetch::JobScraper;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Could not fetch job description from URL ({0}). Please paste the job description text directly instead.")]
    Http(#[from] reqwest::Error),

    #[error("Job posting page returned HTTP {0}. Please paste the job description text directly instead.")]
    Status(u16),

    #[error("No readable job description found at the URL. Please paste the job description text directly instead.")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobInput {
    Url(String),
    Text(String),
}

impl JobInput {
    /// `http://` / `https://` prefixes are URLs, as is a single token containing `www.`.
    /// The latter gets an `https://` scheme.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            JobInput::Url(trimmed.to_string())
        } else if lower.contains("www.") && !trimmed.contains(char::is_whitespace) {
            JobInput::Url(format!("https://{trimmed}"))
        } else {
            JobInput::Text(trimmed.to_string())
        }
    }
}

/// Returns the job description text, scraping it when the input is a URL.
pub async fn resolve_job_description(
    raw: &str,
    scraper: &JobScraper,
) -> Result<String, ScrapeError> {
    match JobInput::classify(raw) {
        JobInput::Text(text) => {
            info!("Job input detected as plain text ({} chars)", text.len());
            Ok(text)
        }
        JobInput::Url(url) => {
            info!("Job input detected as URL, scraping");
            scraper.fetch(&url).await
        }
    }
}
