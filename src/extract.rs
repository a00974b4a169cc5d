// src/extract.rs
//
// Plain-text extraction from PDF bytes. Pages are decoded one at a time so a
// broken page costs only its own text.

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use serde::Serialize;

use crate::utils::error::ExtractError;

/// Text pulled from one document plus a per-page tally for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub text: String,
    pub pages_ok: usize,
    pub pages_failed: usize,
}

impl ExtractionResult {
    /// Empty or whitespace-only text means there is nothing to enrich.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Extracts the text of every decodable page, in page order.
///
/// Fails only when the document itself cannot be opened; page failures are
/// counted and skipped.
pub fn try_extract(bytes: &[u8]) -> Result<ExtractionResult, ExtractError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractError::Open(e.to_string()))?;
    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(ExtractError::NoPages);
    }

    let mut result = ExtractionResult::default();
    for (&page_num, &page_id) in pages.iter() {
        let page_text = match page_fault(&doc, page_id) {
            Some(fault) => Err(fault),
            None => doc.extract_text(&[page_num]).map_err(|e| e.to_string()),
        };
        match page_text {
            Ok(page_text) => {
                result.pages_ok += 1;
                result.text.push_str(&page_text);
                if !page_text.is_empty() && !page_text.ends_with('\n') {
                    result.text.push('\n');
                }
            }
            Err(e) => {
                tracing::warn!("Error extracting text from page {}: {}", page_num, e);
                result.pages_failed += 1;
            }
        }
    }

    tracing::debug!(
        "Extracted {} chars ({} pages ok, {} failed)",
        result.text.len(),
        result.pages_ok,
        result.pages_failed
    );
    Ok(result)
}

// lopdf's text extraction skips content streams it cannot resolve or inflate
// and fonts it cannot find, so a damaged page would read as a blank one.
fn page_fault(doc: &Document, page_id: ObjectId) -> Option<String> {
    for id in doc.get_page_contents(page_id) {
        let stream = match doc.get_object(id).and_then(Object::as_stream) {
            Ok(stream) => stream,
            Err(e) => return Some(format!("content stream {} {} R: {}", id.0, id.1, e)),
        };
        if stream.dict.has(b"Filter") && !stream.content.is_empty() {
            match stream.decompressed_content() {
                Ok(data) if data.is_empty() => {
                    return Some(format!("content stream {} {} R does not decode", id.0, id.1))
                }
                Ok(_) => {}
                Err(e) => return Some(format!("content stream {} {} R: {}", id.0, id.1, e)),
            }
        }
    }

    let fonts = match doc.get_page_fonts(page_id) {
        Ok(fonts) => fonts,
        Err(e) => return Some(format!("fonts: {}", e)),
    };
    let content = doc.get_page_content(page_id).ok()?;
    let operations = match Content::decode(&content) {
        Ok(content) => content.operations,
        Err(e) => return Some(format!("content: {}", e)),
    };
    operations
        .iter()
        .filter(|op| op.operator == "Tf")
        .filter_map(|op| op.operands.first().and_then(|o| o.as_name().ok()))
        .find(|name| !fonts.contains_key(*name))
        .map(|name| format!("font /{} is missing", String::from_utf8_lossy(name)))
}

/// Like [`try_extract`], but an unreadable document yields empty text. Callers
/// treat blank text as a skip signal.
pub fn extract(bytes: &[u8]) -> ExtractionResult {
    try_extract(bytes).unwrap_or_else(|e| {
        tracing::error!("Error reading or processing PDF: {}", e);
        ExtractionResult::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_document_is_blank_not_an_error() {
        let result = extract(b"this is not a pdf");
        assert!(result.is_blank());
        assert_eq!(result, ExtractionResult::default());
        assert!(matches!(try_extract(b"garbage"), Err(ExtractError::Open(_))));
    }

    #[test]
    fn whitespace_only_text_is_blank() {
        let result = ExtractionResult {
            text: " \n\t\n".to_string(),
            pages_ok: 2,
            pages_failed: 0,
        };
        assert!(result.is_blank());
    }
}
