//! Text extraction against hand-built PDFs, including damaged pages.

mod common;

use common::{pdf_with_pages, pdf_with_text, Page};
use earnings_digest::extract::{extract, try_extract};

#[test]
fn extracts_page_text() {
    let result = extract(&pdf_with_text("Quarterly revenue grew"));
    assert_eq!(result.pages_ok, 1);
    assert_eq!(result.pages_failed, 0);
    assert!(result.text.contains("Quarterly revenue grew"));
    assert!(!result.is_blank());
}

#[test]
fn dangling_contents_fails_only_that_page() {
    let bytes = pdf_with_pages(&[Page::Text("Quarterly revenue grew"), Page::DanglingContents]);
    let result = try_extract(&bytes).unwrap();
    assert_eq!(result.pages_ok, 1);
    assert_eq!(result.pages_failed, 1);
    assert!(result.text.contains("Quarterly revenue grew"));
}

#[test]
fn corrupt_stream_and_missing_font_are_page_failures() {
    let bytes = pdf_with_pages(&[
        Page::CorruptStream,
        Page::Text("Net income 7"),
        Page::MissingFont("Ghost line"),
    ]);
    let result = extract(&bytes);
    assert_eq!(result.pages_ok, 1);
    assert_eq!(result.pages_failed, 2);
    assert!(result.text.contains("Net income 7"));
    assert!(!result.text.contains("Ghost line"));
}

#[test]
fn every_page_broken_reads_as_blank() {
    let result = extract(&pdf_with_pages(&[Page::DanglingContents, Page::CorruptStream]));
    assert_eq!(result.pages_ok, 0);
    assert_eq!(result.pages_failed, 2);
    assert!(result.is_blank());
}

#[test]
fn pages_are_separated_by_one_newline() {
    let result = extract(&pdf_with_pages(&[Page::Text("Alpha"), Page::Text("Beta")]));
    assert_eq!(result.pages_ok, 2);
    assert_eq!(result.text, "Alpha\nBeta\n");
}
