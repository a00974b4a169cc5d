//! Fakes and fixtures shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use earnings_digest::discovery::DocumentFetcher;
use earnings_digest::generate::Generator;
use earnings_digest::utils::error::{FetchError, GenerateError};
use earnings_digest::{Document, SourceLocation};

/// One page of a hand-built test PDF.
pub enum Page<'a> {
    /// Shows the phrase in Helvetica.
    Text(&'a str),
    /// `/Contents` points at an object that does not exist.
    DanglingContents,
    /// Flate-filtered content stream holding bytes that are not zlib data.
    CorruptStream,
    /// Shows the phrase with a font the page resources do not define.
    MissingFont(&'a str),
}

/// Single-page PDF showing `phrase`, with a correct xref table.
pub fn pdf_with_text(phrase: &str) -> Vec<u8> {
    pdf_with_pages(&[Page::Text(phrase)])
}

/// PDF with one page per entry, in order, with a correct xref table.
/// Object 1 is the catalog, 2 the page tree, 3 the shared font.
pub fn pdf_with_pages(pages: &[Page]) -> Vec<u8> {
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        String::new(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
    ];
    let mut kids = Vec::new();
    for page in pages {
        let page_num = objects.len() + 1;
        let contents_num = page_num + 1;
        kids.push(format!("{} 0 R", page_num));
        let (contents_ref, stream) = match page {
            Page::Text(phrase) => (contents_num, Some(plain_stream(&show("F1", phrase)))),
            Page::DanglingContents => (99, None),
            Page::CorruptStream => {
                let junk = "definitely not zlib";
                let stream = format!(
                    "<< /Length {} /Filter /FlateDecode >>\nstream\n{}\nendstream",
                    junk.len(),
                    junk
                );
                (contents_num, Some(stream))
            }
            Page::MissingFont(phrase) => (contents_num, Some(plain_stream(&show("F2", phrase)))),
        };
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R /Resources << /Font << /F1 3 0 R >> >> >>",
            contents_ref
        ));
        if let Some(stream) = stream {
            objects.push(stream);
        }
    }
    objects[1] = format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), kids.len());

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }
    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for off in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", off).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        )
        .as_bytes(),
    );
    out
}

fn show(font: &str, phrase: &str) -> String {
    format!("BT /{} 12 Tf 72 720 Td ({}) Tj ET", font, phrase)
}

fn plain_stream(content: &str) -> String {
    format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content)
}

/// Document whose locator is a fake URL under the company's name.
pub fn doc(company: &str, filename: &str) -> Document {
    Document::new(
        SourceLocation::Url(format!("https://ir.example/{}/{}", company, filename)),
        company,
        filename,
    )
}

/// Serves canned bytes per locator; anything unknown is not found.
#[derive(Default)]
pub struct FakeFetcher {
    files: HashMap<String, Vec<u8>>,
}

impl FakeFetcher {
    pub fn with(mut self, doc: &Document, bytes: Vec<u8>) -> Self {
        self.files.insert(doc.source_location.to_string(), bytes);
        self
    }
}

#[async_trait]
impl DocumentFetcher for FakeFetcher {
    async fn fetch(&self, location: &SourceLocation) -> Result<Vec<u8>, FetchError> {
        self.files
            .get(&location.to_string())
            .cloned()
            .ok_or_else(|| FetchError::NotFound(location.to_string()))
    }
}

/// Records prompts; fails summary prompts when `fail_summaries` is set.
#[derive(Default)]
pub struct ScriptedGenerator {
    pub fail_summaries: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn failing_summaries() -> Self {
        Self {
            fail_summaries: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let is_table = prompt.starts_with("From the following financial text");
        if is_table {
            Ok("| Metric | Value |\n|---|---|\n| Revenue | $1 |".to_string())
        } else if self.fail_summaries {
            Err(GenerateError::MissingApiKey)
        } else {
            Ok("## Key Financial Highlights\n- **Revenue** up".to_string())
        }
    }
}
