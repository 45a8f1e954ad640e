use ::scraper::{ElementRef, Html, Selector};
use reqwest::Client;
use tracing::{info, warn};

use super::ScrapeError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// A matched container must hold more than this many characters to count as
/// the job description; otherwise the next selector is tried.
const MIN_DESCRIPTION_CHARS: usize = 200;

/// Probed in order. Site-specific containers first, generic landmarks last.
const DESCRIPTION_SELECTORS: &[&str] = &[
    "[data-testid=\"job-description\"]",
    ".job-description",
    ".jobDescriptionContent",
    ".job-details",
    ".description",
    "[class*=\"description\"]",
    "[id*=\"description\"]",
    "main",
    "article",
    ".content",
];

const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Fetches job posting pages over plain HTTP and extracts their description text.
#[derive(Clone)]
pub struct JobScraper {
    client: Client,
}

impl JobScraper {
    pub fn new(timeout_secs: u64) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        info!("Fetching job posting: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Job posting fetch returned {}", status);
            return Err(ScrapeError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        let description = extract_job_text(&html).ok_or(ScrapeError::Empty)?;

        info!(
            "Successfully scraped job posting, length: {}",
            description.len()
        );
        Ok(description)
    }
}

/// Returns the first sufficiently long description container, falling back
/// to the visible body text.
pub fn extract_job_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for selector_str in DESCRIPTION_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = visible_text(element);
            if text.chars().count() > MIN_DESCRIPTION_CHARS {
                return Some(text);
            }
        }
    }

    warn!("No description container matched, falling back to body text");
    let body = Selector::parse("body").ok()?;
    let text = document
        .select(&body)
        .next()
        .map(visible_text)
        .unwrap_or_default();

    (!text.is_empty()).then_some(text)
}

fn visible_text(element: ElementRef) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.name()))
        });
        if !hidden {
            parts.push(&**text);
        }
    }
    clean_text(&parts.join(" "))
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
