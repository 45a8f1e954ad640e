//! HTML rendering of a `ResumeDocument` with embedded print CSS.

use std::fmt::Write;

use crate::models::resume::{Block, ResumeDocument};

use super::classify::RE_EMAIL;

const RESUME_CSS: &str = r#"
        body {
            font-family: 'Garamond', 'Times New Roman', serif;
            font-size: 11pt;
            line-height: 1.3;
            color: #111;
            background: #fff;
            margin: 0;
            padding: 0.5in;
            box-sizing: border-box;
            width: 8.5in;
        }
        .resume-header {
            text-align: center;
            margin-bottom: 0.25in;
            padding-bottom: 0.1in;
            border-bottom: 1px solid #ccc;
        }
        .name {
            font-size: 22pt;
            font-weight: bold;
            color: #000;
            margin-bottom: 8px;
        }
        .contact {
            font-size: 10pt;
            color: #333;
            margin: 1px 0;
        }
        .contact a {
            color: inherit;
            text-decoration: none;
        }
        .section {
            margin-bottom: 0.2in;
        }
        .section h2 {
            font-size: 13pt;
            font-weight: bold;
            color: #000;
            text-transform: uppercase;
            border-bottom: 1.5px solid #000;
            padding-bottom: 3px;
            margin-bottom: 0.15in;
            letter-spacing: 1px;
        }
        .job-header {
            margin: 6px 0 2px 0;
            font-size: 11pt;
        }
        .job-description {
            margin: 4px 0;
            text-align: justify;
        }
        .bullet-list {
            margin: 5px 0 10px 0;
            padding-left: 0.25in;
            list-style-type: none;
        }
        .bullet-list li {
            margin-bottom: 4px;
            line-height: 1.3;
            position: relative;
            padding-left: 12px;
        }
        .bullet-list li::before {
            content: '\2022';
            position: absolute;
            left: 0;
            top: 1px;
            color: #000;
            font-weight: bold;
        }
        @media print {
            body { width: auto; }
            .section { page-break-inside: avoid; }
        }
"#;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes the line and turns email addresses into `mailto:` links.
fn contact_html(text: &str) -> String {
    let escaped = escape_html(text);
    RE_EMAIL
        .replace_all(&escaped, r#"<a href="mailto:$0">$0</a>"#)
        .into_owned()
}

#[derive(Default)]
struct Writer {
    out: String,
    in_header: bool,
    in_section: bool,
    in_list: bool,
}

impl Writer {
    fn close_list(&mut self) {
        if self.in_list {
            self.out.push_str("</ul>\n");
            self.in_list = false;
        }
    }

    fn close_header(&mut self) {
        if self.in_header {
            self.out.push_str("</div>\n");
            self.in_header = false;
        }
    }

    fn close_section(&mut self) {
        self.close_list();
        if self.in_section {
            self.out.push_str("</div>\n");
            self.in_section = false;
        }
    }

    fn open_header(&mut self) {
        if !self.in_header {
            self.close_section();
            self.out.push_str("<div class=\"resume-header\">\n");
            self.in_header = true;
        }
    }

    /// Body content outside any titled section gets an untitled one.
    fn ensure_section(&mut self) {
        self.close_header();
        if !self.in_section {
            self.out.push_str("<div class=\"section\">\n");
            self.in_section = true;
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Name(text) => {
                self.open_header();
                let _ = writeln!(self.out, "<h1 class=\"name\">{}</h1>", escape_html(text));
            }
            Block::Contact(text) => {
                self.open_header();
                let _ = writeln!(self.out, "<p class=\"contact\">{}</p>", contact_html(text));
            }
            Block::Section(title) => {
                self.close_header();
                self.close_section();
                let _ = writeln!(
                    self.out,
                    "<div class=\"section\">\n<h2>{}</h2>",
                    escape_html(title)
                );
                self.in_section = true;
            }
            Block::Bullet(text) => {
                self.ensure_section();
                if !self.in_list {
                    self.out.push_str("<ul class=\"bullet-list\">\n");
                    self.in_list = true;
                }
                let _ = writeln!(self.out, "<li>{}</li>", escape_html(text));
            }
            Block::JobHeader(text) => {
                self.ensure_section();
                self.close_list();
                let _ = writeln!(
                    self.out,
                    "<p class=\"job-header\"><strong>{}</strong></p>",
                    escape_html(text)
                );
            }
            Block::Paragraph(text) => {
                self.ensure_section();
                self.close_list();
                let _ = writeln!(
                    self.out,
                    "<p class=\"job-description\">{}</p>",
                    escape_html(text)
                );
            }
        }
    }

    fn finish(mut self) -> String {
        self.close_header();
        self.close_section();
        self.out
    }
}

/// Renders the body markup only, without the page wrapper.
pub fn render_body(doc: &ResumeDocument) -> String {
    let mut writer = Writer::default();
    for block in &doc.blocks {
        writer.block(block);
    }
    writer.finish()
}

/// Renders a complete standalone HTML page.
pub fn render_html(doc: &ResumeDocument) -> String {
    let title = doc
        .name()
        .map(|n| format!("{} - Resume", escape_html(n)))
        .unwrap_or_else(|| "Professional Resume".to_string());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{RESUME_CSS}    </style>
</head>
<body>
<div class="resume">
{body}</div>
</body>
</html>
"#,
        body = render_body(doc)
    )
}
