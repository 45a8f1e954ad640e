use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One structural element of a résumé, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Block {
    Name(String),
    Contact(String),
    Section(String),
    JobHeader(String),
    Bullet(String),
    Paragraph(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Name(t)
            | Block::Contact(t)
            | Block::Section(t)
            | Block::JobHeader(t)
            | Block::Bullet(t)
            | Block::Paragraph(t) => t,
        }
    }
}

/// Intermediate form shared by the text formatter, the HTML reader and the
/// PDF/DOCX renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResumeDocument {
    pub blocks: Vec<Block>,
}

impl ResumeDocument {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Name(n) => Some(n.as_str()),
            _ => None,
        })
    }

    /// Characters of visible text across all blocks.
    pub fn char_count(&self) -> usize {
        self.blocks.iter().map(|b| b.text().chars().count()).sum()
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Section(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

/// The JSON object the model is asked to return.
#[derive(Debug, Clone, Deserialize)]
pub struct TailoredResume {
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub resume: String,
}

/// Success payload of the generation endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub generated_resume: String,
    pub explanation: String,
    pub original_length: usize,
    pub optimized_length: usize,
    pub job_description_length: usize,
    pub api_version: &'static str,
    pub timestamp: String,
}

pub const API_VERSION: &str = concat!("resume-tailor-v", env!("CARGO_PKG_VERSION"));

/// RFC 3339 timestamp used in every JSON payload.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
