use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::models::{DocumentKind, DocumentText};

const DOCX_BODY: &str = "word/document.xml";

/// Extracts a resume; only PDF and DOCX are accepted.
pub fn extract_resume(path: &Path) -> Result<DocumentText> {
    let kind = DocumentKind::from_path(path);
    if !kind.is_resume_format() {
        return Err(Error::UnsupportedFormat(file_label(path)));
    }
    extract_with(path, kind)
}

/// Extracts any supported document: PDF, DOCX or plain text.
pub fn extract_document(path: &Path) -> Result<DocumentText> {
    extract_with(path, DocumentKind::from_path(path))
}

/// File name used for display and history records.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn extract_with(path: &Path, kind: DocumentKind) -> Result<DocumentText> {
    let text = match kind {
        DocumentKind::Pdf => {
            tracing::debug!("Extracting text from PDF: {}", path.display());
            PdfExtractor.extract(path)?
        }
        DocumentKind::Docx => {
            tracing::debug!("Extracting text from DOCX: {}", path.display());
            DocxExtractor.extract(path)?
        }
        DocumentKind::Text => {
            tracing::debug!("Reading plain text file: {}", path.display());
            PlainTextExtractor.extract(path)?
        }
        DocumentKind::Unknown => return Err(Error::UnsupportedFormat(file_label(path))),
    };

    let text = DocumentText::new(text);
    if text.is_blank() {
        tracing::warn!("No text extracted from {}", path.display());
    }

    Ok(text)
}

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        // pdf-extract panics on some malformed inputs instead of returning an error.
        match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes)) {
            Ok(result) => result.map_err(|e| Error::parse_failure(file_label(path), e)),
            Err(_) => Err(Error::parse_failure(file_label(path), "malformed PDF")),
        }
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        let xml = read_docx_body(&bytes).map_err(|reason| Error::parse_failure(file_label(path), reason))?;
        Ok(docx_xml_to_text(&xml))
    }
}

fn read_docx_body(bytes: &[u8]) -> std::result::Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let mut entry = archive
        .by_name(DOCX_BODY)
        .map_err(|_| format!("missing {}", DOCX_BODY))?;

    let mut xml = String::new();
    entry.read_to_string(&mut xml).map_err(|e| e.to_string())?;
    Ok(xml)
}

fn docx_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"))
}

/// Paragraphs become lines; tabs and breaks inside runs are kept as
/// whitespace.
fn docx_xml_to_text(xml: &str) -> String {
    let marked = xml
        .replace("</w:p>", "\n")
        .replace("<w:tab/>", "\t")
        .replace("<w:br/>", "\n");

    let stripped = docx_tag_pattern().replace_all(&marked, "");

    let text = stripped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&");

    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        String::from_utf8(bytes).map_err(|e| Error::parse_failure(file_label(path), e))
    }
}
