//! DOCX text extraction. A .docx file is a zip package, and the body text
//! lives in `word/document.xml` as `<w:t>` runs inside `<w:p>` paragraphs.

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

static RE_DOCX_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*[^/])?>(.*?)</w:t>|</w:p>|<w:tab\b[^>]*/>|<w:(?:br|cr)\b[^>]*/>")
        .unwrap()
});
/// Paragraph properties declare tab stops as `<w:tab .../>` too.
static RE_PARAGRAPH_PROPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<w:pPr>.*?</w:pPr>").unwrap());
static RE_XML_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").unwrap());

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Docx(format!("not a valid .docx package: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::Docx(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(format!("unreadable {DOCUMENT_PART}: {e}")))?;

    Ok(document_xml_to_text(&xml))
}

/// Flattens WordprocessingML into text: one line per paragraph, tabs and
/// breaks preserved, entities decoded.
pub fn document_xml_to_text(xml: &str) -> String {
    let body = RE_PARAGRAPH_PROPS.replace_all(xml, "");
    let mut out = String::with_capacity(body.len() / 4);
    for caps in RE_DOCX_TOKENS.captures_iter(&body) {
        if let Some(run) = caps.get(1) {
            out.push_str(&decode_xml_entities(run.as_str()));
            continue;
        }
        let token = &caps[0];
        if token == "</w:p>" {
            out.push('\n');
        } else if token.starts_with("<w:tab") {
            out.push('\t');
        } else {
            out.push('\n');
        }
    }
    out
}

pub fn decode_xml_entities(s: &str) -> String {
    RE_XML_ENTITY
        .replace_all(s, |caps: &Captures| {
            let entity = &caps[1];
            match entity {
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                _ => {
                    let code = if let Some(hex) = entity.strip_prefix("#x") {
                        u32::from_str_radix(hex, 16).ok()
                    } else {
                        entity[1..].parse::<u32>().ok()
                    };
                    code.and_then(char::from_u32)
                        .map(String::from)
                        .unwrap_or_else(|| caps[0].to_string())
                }
            }
        })
        .into_owned()
}
