//! Résumé formatter: turns raw résumé text (or loosely structured HTML) into a
//! `ResumeDocument`, and renders that document as a print-ready HTML page.
//!
//! Both inputs are reduced to a list of `Line`s first. Text lines carry no
//! hint beyond a `#` marker; lines read from HTML carry the structure their
//! element implied. A single classification pass then builds the document.

pub mod classify;
pub mod html;
pub mod reader;

use crate::models::resume::{Block, ResumeDocument};

use self::classify::{
    bullet_text, clean_line, is_contact, is_job_header, is_section_header, section_title,
};

pub use self::html::render_html;
pub use self::reader::read_html;

/// Header lines kept when a document has no section headers at all.
const MAX_HEADERLESS_CONTACT_LINES: usize = 4;
/// Pre-section lines at or above this length are body text, not contact info.
const MAX_CONTACT_CHARS: usize = 100;

/// What the source already told us about a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineHint {
    Plain,
    /// Text line that started with `#`.
    Marked,
    Name,
    Section,
    Contact,
    JobHeader,
    Bullet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    pub hint: LineHint,
    pub text: String,
}

impl Line {
    pub fn new(hint: LineHint, text: impl Into<String>) -> Self {
        Self {
            hint,
            text: text.into(),
        }
    }

    fn is_section(&self, index: usize) -> bool {
        match self.hint {
            LineHint::Section => true,
            LineHint::Marked => index != 0 || is_section_header(&self.text),
            LineHint::Plain => is_section_header(&self.text),
            _ => false,
        }
    }

    fn is_contact_like(&self) -> bool {
        self.hint == LineHint::Contact
            || (self.hint == LineHint::Plain && bullet_text(&self.text).is_none() && is_contact(&self.text))
    }
}

/// Splits raw text into cleaned, non-empty lines.
pub(crate) fn text_lines(text: &str) -> Vec<Line> {
    text.lines()
        .map(clean_line)
        .filter(|(line, _)| !line.is_empty())
        .map(|(line, marked)| {
            let hint = if marked { LineHint::Marked } else { LineHint::Plain };
            Line::new(hint, line)
        })
        .collect()
}

/// Parses raw résumé text into structural blocks.
pub fn parse_resume_text(text: &str) -> ResumeDocument {
    build_document(text_lines(text))
}

/// Raw résumé text straight to a complete HTML page.
pub fn format_resume_as_html(text: &str) -> String {
    render_html(&parse_resume_text(text))
}

pub(crate) fn build_document(lines: Vec<Line>) -> ResumeDocument {
    if lines.is_empty() {
        return ResumeDocument::default();
    }

    let first_section = lines
        .iter()
        .enumerate()
        .position(|(i, line)| line.is_section(i));

    let header_len = match first_section {
        Some(i) => i,
        None => {
            1 + lines[1..]
                .iter()
                .take(MAX_HEADERLESS_CONTACT_LINES)
                .take_while(|line| line.is_contact_like())
                .count()
        }
    };

    let mut blocks = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().take(header_len).enumerate() {
        blocks.push(header_block(i, line));
    }
    for line in lines.iter().skip(header_len) {
        blocks.push(body_block(line));
    }

    ResumeDocument { blocks }
}

fn header_block(index: usize, line: &Line) -> Block {
    let text = line.text.clone();
    if index == 0 && line.hint != LineHint::Bullet {
        return Block::Name(text);
    }
    match line.hint {
        LineHint::Contact => Block::Contact(text),
        LineHint::Bullet => Block::Bullet(text),
        LineHint::JobHeader => Block::JobHeader(text),
        _ => {
            if let Some(body) = bullet_text(&text) {
                Block::Bullet(body.to_string())
            } else if is_contact(&text)
                || (text.chars().count() < MAX_CONTACT_CHARS && !text.ends_with('.'))
            {
                Block::Contact(text)
            } else {
                Block::Paragraph(text)
            }
        }
    }
}

fn body_block(line: &Line) -> Block {
    let text = &line.text;
    match line.hint {
        LineHint::Section | LineHint::Name | LineHint::Marked => Block::Section(section_title(text)),
        LineHint::Bullet => Block::Bullet(bullet_text(text).unwrap_or(text).to_string()),
        LineHint::JobHeader => Block::JobHeader(text.clone()),
        LineHint::Contact => Block::Paragraph(text.clone()),
        LineHint::Plain => {
            if is_section_header(text) {
                Block::Section(section_title(text))
            } else if let Some(body) = bullet_text(text) {
                Block::Bullet(body.to_string())
            } else if is_job_header(text) {
                Block::JobHeader(text.clone())
            } else {
                Block::Paragraph(text.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Jane Doe
jane.doe@example.com | +1 (555) 123-4567
Seattle, WA

PROFESSIONAL SUMMARY
Backend engineer with eight years of experience building payment systems.

Experience
Senior Engineer, Acme Corp  2019 - Present
• Cut p99 latency by 40% across 3 services
- Led a team of 5 engineers

EDUCATION
B.S. Computer Science, State University 2015
";

    #[test]
    fn test_parse_sample_structure() {
        let doc = parse_resume_text(SAMPLE);
        assert_eq!(
            doc.blocks,
            vec![
                Block::Name("Jane Doe".into()),
                Block::Contact("jane.doe@example.com | +1 (555) 123-4567".into()),
                Block::Contact("Seattle, WA".into()),
                Block::Section("PROFESSIONAL SUMMARY".into()),
                Block::Paragraph(
                    "Backend engineer with eight years of experience building payment systems."
                        .into()
                ),
                Block::Section("Experience".into()),
                Block::JobHeader("Senior Engineer, Acme Corp  2019 - Present".into()),
                Block::Bullet("Cut p99 latency by 40% across 3 services".into()),
                Block::Bullet("Led a team of 5 engineers".into()),
                Block::Section("EDUCATION".into()),
                Block::JobHeader("B.S. Computer Science, State University 2015".into()),
            ]
        );
    }

    #[test]
    fn test_markdown_headings_become_sections() {
        let doc = parse_resume_text("# Jane Doe\n## Projects\n**Ledger** - a Rust accounting tool that reconciles bank feeds.");
        assert_eq!(doc.blocks[0], Block::Name("Jane Doe".into()));
        assert_eq!(doc.blocks[1], Block::Section("Projects".into()));
        assert_eq!(
            doc.blocks[2],
            Block::Paragraph("Ledger - a Rust accounting tool that reconciles bank feeds.".into())
        );
    }

    #[test]
    fn test_hash_without_space_is_not_a_heading() {
        let doc = parse_resume_text("Jane Doe\nEXPERIENCE\n#1 ranked rep in the region out of 40 reps in 2020.");
        assert_eq!(
            doc.blocks[2],
            Block::Paragraph("#1 ranked rep in the region out of 40 reps in 2020.".into())
        );
    }

    #[test]
    fn test_empty_text_yields_empty_document() {
        assert!(parse_resume_text("").is_empty());
        assert!(parse_resume_text("  \n \n").is_empty());
    }

    #[test]
    fn test_headerless_document_keeps_contact_lines_in_header() {
        let text = "John Smith\njohn@smith.dev\ngithub.com/jsmith\nBuilt a compiler for a toy language in Rust over two summers.\n• Wrote 40k lines";
        let doc = parse_resume_text(text);
        assert_eq!(doc.blocks[0], Block::Name("John Smith".into()));
        assert_eq!(doc.blocks[1], Block::Contact("john@smith.dev".into()));
        assert_eq!(doc.blocks[2], Block::Contact("github.com/jsmith".into()));
        assert!(matches!(doc.blocks[3], Block::Paragraph(_)));
        assert_eq!(doc.blocks[4], Block::Bullet("Wrote 40k lines".into()));
        assert_eq!(doc.sections().count(), 0);
    }

    #[test]
    fn test_document_starting_with_section_has_no_name() {
        let doc = parse_resume_text("SKILLS\nRust, Go");
        assert_eq!(doc.name(), None);
        assert_eq!(doc.blocks[0], Block::Section("SKILLS".into()));
    }

    #[test]
    fn test_format_resume_as_html_wraps_document() {
        let html = format_resume_as_html(SAMPLE);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1 class=\"name\">Jane Doe</h1>"));
        assert!(html.contains("<h2>Experience</h2>"));
    }
}
