use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use crate::models::resume::{Block, ResumeDocument};

use super::RenderError;

// US Letter, 0.75in margins. All layout values are millimetres.
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 19.05;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica advance width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;
const LINE_SPACING: f32 = 1.3;

const NAME_SIZE: f32 = 20.0;
const SECTION_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 11.0;
const CONTACT_SIZE: f32 = 10.0;

const BULLET_INDENT: f32 = 4.0;
const BULLET_HANG: f32 = 3.0;

/// Characters per line that fit `width` millimetres at `size` points.
fn chars_per_line(size: f32, width: f32) -> usize {
    let glyph_mm = size * AVG_GLYPH_EM * PT_TO_MM;
    ((width / glyph_mm).floor() as usize).max(1)
}

fn line_height(size: f32) -> f32 {
    size * LINE_SPACING * PT_TO_MM
}

/// Greedy word wrap by character count.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let current_len = current_line.chars().count();
        if current_len > 0 && current_len + word.chars().count() + 1 > max_chars {
            lines.push(std::mem::take(&mut current_line));
        }
        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Maps text onto what the builtin fonts can encode (WinAnsi).
pub fn winansi_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{2022}' | '\u{25CF}' | '\u{25AA}' | '\u{25E6}' | '\u{2023}' | '\u{2043}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' | '\u{2002}'..='\u{200B}' => out.push(' '),
            '\t' => out.push(' '),
            c if c.is_ascii_graphic() || c == ' ' => out.push(c),
            c if ('\u{00A1}'..='\u{00FF}').contains(&c) => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Baseline cursor, measured from the bottom edge.
    y: f32,
    pages: usize,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self, RenderError> {
        let (doc, page1, layer1) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let layer = doc.get_page(page1).get_layer(layer1);
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
            pages: 1,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
        self.pages += 1;
    }

    /// Moves the cursor down by `height`, breaking the page first if needed.
    fn advance(&mut self, height: f32) {
        if self.y - height < MARGIN {
            self.new_page();
        }
        self.y -= height;
    }

    fn gap(&mut self, height: f32) {
        // A gap never starts a page on its own.
        self.y = (self.y - height).max(MARGIN);
    }

    fn line(&mut self, text: &str, size: f32, bold: bool, x: f32) {
        self.advance(line_height(size));
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(winansi_safe(text), size, Mm(x), Mm(self.y), font);
    }

    fn wrapped(&mut self, text: &str, size: f32, bold: bool, x: f32) {
        let width = CONTENT_WIDTH - (x - MARGIN);
        for line in wrap_text(text, chars_per_line(size, width)) {
            self.line(&line, size, bold, x);
        }
    }

    fn rule(&mut self) {
        let y = self.y - 1.5;
        self.layer.set_outline_thickness(0.75);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(y)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
            ],
            is_closed: false,
        });
        self.gap(3.0);
    }

    fn bullet(&mut self, text: &str) {
        let x = MARGIN + BULLET_INDENT;
        let text_x = x + BULLET_HANG;
        let width = CONTENT_WIDTH - (text_x - MARGIN);
        for (i, line) in wrap_text(text, chars_per_line(BODY_SIZE, width))
            .iter()
            .enumerate()
        {
            if i == 0 {
                self.advance(line_height(BODY_SIZE));
                self.layer
                    .use_text("-", BODY_SIZE, Mm(x), Mm(self.y), &self.regular);
                self.layer.use_text(
                    winansi_safe(line),
                    BODY_SIZE,
                    Mm(text_x),
                    Mm(self.y),
                    &self.regular,
                );
            } else {
                self.line(line, BODY_SIZE, false, text_x);
            }
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Name(text) => {
                self.wrapped(text, NAME_SIZE, true, MARGIN);
                self.gap(1.5);
            }
            Block::Contact(text) => self.wrapped(text, CONTACT_SIZE, false, MARGIN),
            Block::Section(title) => {
                self.gap(4.0);
                // Keep the heading together with its first line.
                if self.y - line_height(SECTION_SIZE) - line_height(BODY_SIZE) - 3.0 < MARGIN {
                    self.new_page();
                }
                self.line(&title.to_uppercase(), SECTION_SIZE, true, MARGIN);
                self.rule();
            }
            Block::JobHeader(text) => {
                self.gap(1.5);
                self.wrapped(text, BODY_SIZE, true, MARGIN);
            }
            Block::Bullet(text) => self.bullet(text),
            Block::Paragraph(text) => self.wrapped(text, BODY_SIZE, false, MARGIN),
        }
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        Ok(self.doc.save_to_bytes()?)
    }
}

fn layout(doc: &ResumeDocument) -> Result<PdfWriter, RenderError> {
    let title = doc
        .name()
        .map(|n| format!("{n} - Resume"))
        .unwrap_or_else(|| "Resume".to_string());

    let mut writer = PdfWriter::new(&title)?;
    for block in &doc.blocks {
        writer.block(block);
    }
    Ok(writer)
}

pub fn render_pdf(doc: &ResumeDocument) -> Result<Vec<u8>, RenderError> {
    let writer = layout(doc)?;
    tracing::debug!("Rendered PDF with {} page(s)", writer.pages);
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("one two three four five six", 9);
        assert_eq!(lines, vec!["one two", "three", "four five", "six"]);
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn test_wrap_text_keeps_long_words_whole() {
        assert_eq!(
            wrap_text("a supercalifragilistic b", 5),
            vec!["a", "supercalifragilistic", "b"]
        );
    }

    #[test]
    fn test_winansi_transliteration() {
        assert_eq!(
            winansi_safe("\u{201C}Lead\u{201D} \u{2013} Caf\u{00E9} \u{2022} \u{2026} \u{1F600}"),
            "\"Lead\" - Caf\u{00E9} - ... ?"
        );
    }

    #[test]
    fn test_render_pdf_produces_pdf_bytes() {
        let doc = ResumeDocument {
            blocks: vec![
                Block::Name("Jane Doe".into()),
                Block::Contact("jane@example.com".into()),
                Block::Section("Experience".into()),
                Block::JobHeader("Engineer | Acme | 2020".into()),
                Block::Bullet("Shipped the thing".into()),
            ],
        };
        let bytes = render_pdf(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_documents_break_pages() {
        let mut blocks = vec![Block::Name("Jane Doe".into())];
        for i in 0..120 {
            blocks.push(Block::Bullet(format!(
                "Achievement number {i} with enough words to wrap across a line or two on the page"
            )));
        }
        let writer = layout(&ResumeDocument { blocks }).unwrap();
        assert!(writer.pages > 1);
        assert!(writer.y >= MARGIN);
    }

    #[test]
    fn test_empty_document_still_renders() {
        let bytes = render_pdf(&ResumeDocument::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
