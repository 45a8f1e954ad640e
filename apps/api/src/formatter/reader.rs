//! Reads loosely structured résumé HTML (typically model output) back into a
//! `ResumeDocument`, so it can be re-rendered with the house stylesheet.

use ::scraper::{ElementRef, Html, Node};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::ResumeDocument;

use super::classify::clean_line;
use super::{build_document, parse_resume_text, Line, LineHint};

static RE_HTML_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<\s*/?\s*(?:html|body|div|section|article|p|h[1-6]|ul|ol|li|br|table|span|strong)\b")
        .unwrap()
});

const SKIPPED_ELEMENTS: &[&str] = &["head", "title", "style", "script", "noscript", "template"];

/// Elements that start and end a line of their own.
const BLOCK_ELEMENTS: &[&str] = &[
    "html", "body", "div", "section", "article", "header", "footer", "main", "aside", "nav",
    "ul", "ol", "dl", "dt", "dd", "table", "thead", "tbody", "tr", "td", "th", "blockquote",
    "pre", "hr", "address", "figure",
];

pub fn looks_like_html(input: &str) -> bool {
    RE_HTML_TAG.is_match(input)
}

/// Parses HTML into structural blocks. Input without any recognisable markup
/// is parsed as plain text.
pub fn read_html(html: &str) -> ResumeDocument {
    if !looks_like_html(html) {
        return parse_resume_text(html);
    }

    let document = Html::parse_document(html);
    let mut reader = LineReader::default();
    reader.element(document.root_element());
    reader.flush();

    build_document(reader.lines)
}

struct LineReader {
    lines: Vec<Line>,
    current: String,
    hint: LineHint,
}

impl Default for LineReader {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            current: String::new(),
            hint: LineHint::Plain,
        }
    }
}

impl LineReader {
    fn flush(&mut self) {
        let collapsed = self.current.split_whitespace().collect::<Vec<_>>().join(" ");
        self.current.clear();

        let (text, marked) = clean_line(&collapsed);
        if text.is_empty() {
            return;
        }
        let hint = if marked && self.hint == LineHint::Plain {
            LineHint::Marked
        } else {
            self.hint
        };
        self.lines.push(Line::new(hint, text));
    }

    fn children(&mut self, element: ElementRef) {
        for child in element.children() {
            if let Some(child_element) = ElementRef::wrap(child) {
                self.element(child_element);
            } else if let Some(text) = child.value().as_text() {
                self.current.push_str(text);
            }
        }
    }

    /// Reads `element` as one hinted block. Line breaks inside it keep the hint.
    fn block(&mut self, hint: LineHint, element: ElementRef) {
        self.flush();
        let outer = std::mem::replace(&mut self.hint, hint);
        self.children(element);
        self.flush();
        self.hint = outer;
    }

    fn element(&mut self, element: ElementRef) {
        let name = element.value().name();
        if SKIPPED_ELEMENTS.contains(&name) {
            return;
        }

        match name {
            "br" => self.flush(),
            "h1" => self.block(LineHint::Name, element),
            "h2" | "h3" | "h4" | "h5" | "h6" => self.block(LineHint::Section, element),
            "li" => self.block(LineHint::Bullet, element),
            "p" if self.hint != LineHint::Plain => self.block(self.hint, element),
            "p" => self.block(paragraph_hint(element), element),
            _ if BLOCK_ELEMENTS.contains(&name) => {
                self.flush();
                self.children(element);
                self.flush();
            }
            _ => self.children(element),
        }
    }
}

fn paragraph_hint(element: ElementRef) -> LineHint {
    let has_class = |wanted: &str| element.value().classes().any(|c| c == wanted);
    if has_class("contact") {
        LineHint::Contact
    } else if has_class("job-header") || is_bold_only(element) {
        LineHint::JobHeader
    } else if has_class("name") {
        LineHint::Name
    } else {
        LineHint::Plain
    }
}

/// A paragraph whose only content is a single `<strong>`/`<b>` element.
fn is_bold_only(element: ElementRef) -> bool {
    let mut bold = 0;
    for child in element.children() {
        match child.value() {
            Node::Element(e) if matches!(e.name(), "strong" | "b") => bold += 1,
            Node::Element(_) => return false,
            Node::Text(text) if text.trim().is_empty() => {}
            Node::Text(_) => return false,
            _ => {}
        }
    }
    bold == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{parse_resume_text, render_html};
    use crate::models::resume::Block;

    #[test]
    fn test_reads_model_html() {
        let html = r#"
            <html><head><title>Resume</title><style>h1 { color: red }</style></head>
            <body>
              <h1>Jane Doe</h1>
              <p class="contact">jane@example.com<br>Seattle, WA</p>
              <h2>Experience</h2>
              <p><strong>Staff Engineer | Acme | 2021 - Present</strong></p>
              <ul>
                <li>Designed the <em>ledger</em> service</li>
                <li>Mentored 4 engineers</li>
              </ul>
              <p>Worked across payments and risk teams on reliability work.</p>
            </body></html>"#;

        let doc = read_html(html);
        assert_eq!(
            doc.blocks,
            vec![
                Block::Name("Jane Doe".into()),
                Block::Contact("jane@example.com".into()),
                Block::Contact("Seattle, WA".into()),
                Block::Section("Experience".into()),
                Block::JobHeader("Staff Engineer | Acme | 2021 - Present".into()),
                Block::Bullet("Designed the ledger service".into()),
                Block::Bullet("Mentored 4 engineers".into()),
                Block::Paragraph("Worked across payments and risk teams on reliability work.".into()),
            ]
        );
    }

    #[test]
    fn test_rendered_html_reads_back_to_same_blocks() {
        let text = "Jane Doe\njane@example.com | Seattle, WA\nSKILLS\n• Rust & Go\n• Kafka\nExperience\nEngineer, Acme Corp 2019 - Present\nBuilt R&D tooling for the 'core' team.";
        let original = parse_resume_text(text);
        let reread = read_html(&render_html(&original));
        assert_eq!(reread, original);
    }

    #[test]
    fn test_plain_text_falls_back_to_text_parser() {
        let text = "Jane Doe\nEDUCATION\nB.S. Physics, MIT 2012";
        assert_eq!(read_html(text), parse_resume_text(text));
    }

    #[test]
    fn test_unclassed_paragraphs_use_heuristics() {
        let html = "<div><p>John Smith</p><p>john@smith.dev</p><p>SKILLS</p><p>- Terraform</p></div>";
        let doc = read_html(html);
        assert_eq!(doc.name(), Some("John Smith"));
        assert_eq!(doc.blocks[1], Block::Contact("john@smith.dev".into()));
        assert_eq!(doc.blocks[2], Block::Section("SKILLS".into()));
        assert_eq!(doc.blocks[3], Block::Bullet("Terraform".into()));
    }

    #[test]
    fn test_nested_paragraphs_keep_outer_hint() {
        let html = "<h1>Jane Doe</h1><h2><p>Experience</p></h2><ul><li><p>Built the ledger service</p></li></ul>";
        let doc = read_html(html);
        assert_eq!(
            doc.blocks,
            vec![
                Block::Name("Jane Doe".into()),
                Block::Section("Experience".into()),
                Block::Bullet("Built the ledger service".into()),
            ]
        );
    }

    #[test]
    fn test_scripts_are_ignored() {
        let doc = read_html("<body><script>alert('x')</script><h2>Skills</h2></body>");
        assert_eq!(doc.blocks, vec![Block::Section("Skills".into())]);
    }
}
