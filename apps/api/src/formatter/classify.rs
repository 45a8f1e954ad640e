//! Line-level heuristics: section headers, bullets, job headers, contact lines.

use once_cell::sync::Lazy;
use regex::Regex;

/// Section titles recognised regardless of casing. Compared lowercased,
/// without a trailing colon.
const SECTION_KEYWORDS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "employment history",
    "education",
    "skills",
    "technical skills",
    "core competencies",
    "summary",
    "professional summary",
    "profile",
    "objective",
    "qualifications",
    "certifications",
    "projects",
    "awards",
    "publications",
    "languages",
    "volunteer experience",
    "interests",
];

/// Length bounds of an all-caps line that counts as a section header.
/// The lower bound keeps acronyms like "AWS" in the body.
const MAX_CAPS_HEADER_CHARS: usize = 30;
const MIN_CAPS_HEADER_LETTERS: usize = 4;
/// Lines at or above this length are never job headers.
const MAX_JOB_HEADER_CHARS: usize = 150;
/// The `Word, Capitalised` job-header pattern only applies to short lines.
const MAX_COMMA_HEADER_WORDS: usize = 8;

/// Glyphs that start a bullet when followed by whitespace.
const BULLET_GLYPHS: &[char] = &[
    '•', '·', '‣', '▪', '▫', '⁃', '◦', '●', '○', '■', '□', '–', '-', '*', '➤', '✓',
];
/// Glyphs unambiguous enough to start a bullet without a following space.
const TIGHT_BULLET_GLYPHS: &[char] = &['•', '●', '▪', '◦', '‣'];

static RE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
static RE_PRESENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:present|current)\b").unwrap());
static RE_COMMA_CAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z]\s*,\s*[A-Z][a-z]+").unwrap());
pub(crate) static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
static RE_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\(?\d[\d\s().-]{7,}\d").unwrap());
static RE_LEADING_HASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}(?:\s+|$)").unwrap());

/// Trims a raw line and strips markdown residue. Returns the cleaned text and
/// whether the line carried a `#` heading marker.
pub fn clean_line(raw: &str) -> (String, bool) {
    let trimmed = raw.trim();
    let marked = RE_LEADING_HASHES.is_match(trimmed);
    let without_hashes = RE_LEADING_HASHES.replace(trimmed, "");
    let cleaned = without_hashes.replace("**", "").replace("__", "");
    (cleaned.trim().to_string(), marked)
}

pub fn is_section_keyword(line: &str) -> bool {
    let normalized = line.trim().trim_end_matches(':').trim().to_lowercase();
    SECTION_KEYWORDS.contains(&normalized.as_str())
}

/// Short, all-uppercase lines ("WORK HISTORY", "SKILLS & TOOLS").
pub fn is_caps_header(line: &str) -> bool {
    let line = line.trim().trim_end_matches(':');
    line.chars().count() < MAX_CAPS_HEADER_CHARS
        && line.chars().filter(|c| c.is_ascii_uppercase()).count() >= MIN_CAPS_HEADER_LETTERS
        && line
            .chars()
            .all(|c| c.is_ascii_uppercase() || matches!(c, ' ' | '&' | '/'))
}

pub fn is_section_header(line: &str) -> bool {
    is_section_keyword(line) || is_caps_header(line)
}

/// Title text for a section header line.
pub fn section_title(line: &str) -> String {
    line.trim().trim_end_matches(':').trim().to_string()
}

/// Returns the bullet body with its glyph stripped, if the line is a bullet.
pub fn bullet_text(line: &str) -> Option<&str> {
    let first = line.chars().next()?;
    if !BULLET_GLYPHS.contains(&first) {
        return None;
    }
    let rest = &line[first.len_utf8()..];
    let body = rest.trim_start();
    if body.is_empty() {
        return None;
    }
    let spaced = rest.len() != body.len();
    (spaced || TIGHT_BULLET_GLYPHS.contains(&first)).then_some(body)
}

/// Title/company/date lines such as "Acme Corp | Senior Engineer | 2019 - Present".
pub fn is_job_header(line: &str) -> bool {
    let line = line.trim();
    if line.chars().count() >= MAX_JOB_HEADER_CHARS || line.ends_with('.') {
        return false;
    }
    if RE_YEAR.is_match(line) || RE_PRESENT.is_match(line) || line.contains('|') {
        return true;
    }
    line.split_whitespace().count() <= MAX_COMMA_HEADER_WORDS && RE_COMMA_CAP.is_match(line)
}

pub fn is_contact(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    RE_EMAIL.is_match(line)
        || RE_PHONE.is_match(line)
        || lower.contains("linkedin.com")
        || lower.contains("github.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_line_strips_markdown() {
        assert_eq!(clean_line("## **Experience**"), ("Experience".to_string(), true));
        assert_eq!(clean_line("  plain  "), ("plain".to_string(), false));
        assert_eq!(clean_line("__Skills__:"), ("Skills:".to_string(), false));
        assert_eq!(clean_line("#1 ranked rep"), ("#1 ranked rep".to_string(), false));
        assert_eq!(clean_line("###"), ("".to_string(), true));
    }

    #[test]
    fn test_section_keywords_case_insensitive() {
        assert!(is_section_header("Experience"));
        assert!(is_section_header("work experience:"));
        assert!(is_section_header("TECHNICAL SKILLS"));
        assert!(!is_section_header("Experienced engineer"));
    }

    #[test]
    fn test_caps_header_rules() {
        assert!(is_caps_header("WORK HISTORY"));
        assert!(is_caps_header("SKILLS & TOOLS"));
        assert!(!is_caps_header("AWS"));
        assert!(!is_caps_header("THIS LINE IS FAR TOO LONG FOR A HEADER"));
        assert!(!is_caps_header("IBM 2019"));
        assert!(!is_caps_header("   "));
    }

    #[test]
    fn test_bullet_text_variants() {
        assert_eq!(bullet_text("• Built APIs"), Some("Built APIs"));
        assert_eq!(bullet_text("•Built APIs"), Some("Built APIs"));
        assert_eq!(bullet_text("- Shipped v2"), Some("Shipped v2"));
        assert_eq!(bullet_text("* Led team of 5"), Some("Led team of 5"));
        assert_eq!(bullet_text("-5% churn"), None);
        assert_eq!(bullet_text("•"), None);
        assert_eq!(bullet_text("Plain sentence"), None);
    }

    #[test]
    fn test_job_header_detection() {
        assert!(is_job_header("Acme Corp | Senior Engineer"));
        assert!(is_job_header("Software Engineer, Google  2019 - 2022"));
        assert!(is_job_header("Staff Engineer, Present"));
        assert!(is_job_header("Engineer, Globex"));
        assert!(!is_job_header(
            "Reduced cloud spend by 30% in 2021 through rightsizing."
        ));
        assert!(!is_job_header("Python, Rust, Go, Kubernetes, Terraform, Docker, Kafka, Redis, Postgres"));
    }

    #[test]
    fn test_contact_detection() {
        assert!(is_contact("jane.doe@example.com"));
        assert!(is_contact("+1 (555) 123-4567"));
        assert!(is_contact("linkedin.com/in/janedoe"));
        assert!(!is_contact("Seattle, WA"));
    }
}
