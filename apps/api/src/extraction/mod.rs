//! PDF text extraction.
//!
//! Text-bearing PDFs only: scanned or image-only documents come back as
//! `PipelineError::EmptyDocument`, which callers surface as a validation error.

use std::panic;

use lopdf::{Document, Object, ObjectId};
use tracing::{debug, warn};

use crate::errors::PipelineError;

/// Extracts the text of every page, joined by newlines and trimmed.
///
/// Fails with `Extraction` when the bytes are not a readable PDF or any page
/// cannot be decoded, and with `EmptyDocument` when no text remains.
pub fn extract_text(data: &[u8]) -> Result<String, PipelineError> {
    // pdf-extract and lopdf panic on some malformed inputs instead of returning an error.
    let pages = panic::catch_unwind(|| {
        check_page_streams(data)?;
        pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| PipelineError::Extraction(e.to_string()))
    })
    .map_err(|_| PipelineError::Extraction("PDF parser aborted on malformed input".into()))??;

    debug!("Extracted {} page(s) from {} bytes", pages.len(), data.len());
    join_pages(&pages)
}

/// Fails when a page's compressed content stream cannot be decoded.
///
/// pdf-extract reads such a page as blank, so the check runs up front.
fn check_page_streams(data: &[u8]) -> Result<(), PipelineError> {
    let doc = Document::load_mem(data).map_err(|e| PipelineError::Extraction(e.to_string()))?;
    if doc.is_encrypted() {
        return Ok(());
    }

    for (page_number, page_id) in doc.get_pages() {
        for content_id in doc.get_page_contents(page_id) {
            if !stream_decodes(&doc, content_id) {
                warn!("Content stream {content_id:?} of page {page_number} cannot be decoded");
                return Err(PipelineError::Extraction(format!(
                    "Page {page_number} could not be decoded"
                )));
            }
        }
    }
    Ok(())
}

fn stream_decodes(doc: &Document, id: ObjectId) -> bool {
    let Ok(Object::Stream(stream)) = doc.get_object(id) else {
        return true;
    };
    if stream.dict.get(b"Filter").is_err() || stream.content.is_empty() {
        return true;
    }
    matches!(stream.decompressed_content(), Ok(decoded) if !decoded.is_empty())
}

pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> Result<String, PipelineError> {
    let text = pages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    let text = text.trim();

    if text.is_empty() {
        return Err(PipelineError::EmptyDocument);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::pdf_with_pages;

    #[test]
    fn test_join_pages_uses_newline_and_trims() {
        let text = join_pages(&["  first page", "second page  \n"]).unwrap();
        assert_eq!(text, "first page\nsecond page");
    }

    #[test]
    fn test_join_pages_whitespace_only_is_empty_document() {
        let err = join_pages(&[" \n", "\t"]).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyDocument));
    }

    #[test]
    fn test_join_pages_no_pages_is_empty_document() {
        let pages: [&str; 0] = [];
        assert!(matches!(
            join_pages(&pages),
            Err(PipelineError::EmptyDocument)
        ));
    }

    #[test]
    fn test_extracts_text_from_every_page() {
        let pdf = pdf_with_pages(&[&["Jane Doe", "jane@example.com"], &["Skills Docker"]]);
        let text = extract_text(&pdf).unwrap();
        let pages = pdf_extract::extract_text_from_mem_by_pages(&pdf).unwrap();
        assert_eq!(text, join_pages(&pages).unwrap());

        assert!(text.contains("Jane Doe"), "text was {text:?}");
        assert!(text.contains("jane@example.com"), "text was {text:?}");
        assert!(text.contains("Docker"), "text was {text:?}");
        assert_eq!(text, text.trim());
        let first = text.find("Jane Doe").unwrap();
        let second = text.find("Docker").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_pdf_without_text_is_empty_document() {
        let pdf = pdf_with_pages(&[&[], &[]]);
        assert!(matches!(
            extract_text(&pdf),
            Err(PipelineError::EmptyDocument)
        ));
    }

    #[test]
    fn test_undecodable_page_is_extraction_error() {
        let pdf = pdf_with_pages(&[&["Alpha"], &["Beta"]]);
        let mut doc = lopdf::Document::load_mem(&pdf).unwrap();
        let second_page = doc.get_pages()[&2];
        let content_id = doc.get_page_contents(second_page)[0];
        doc.objects.insert(
            content_id,
            Object::Stream(lopdf::Stream::new(
                lopdf::dictionary! { "Filter" => "FlateDecode" },
                b"\x00\x01garbage-not-zlib".to_vec(),
            )),
        );
        let mut corrupt = Vec::new();
        doc.save_to(&mut corrupt).unwrap();

        let err = extract_text(&corrupt).unwrap_err();
        assert!(matches!(err, PipelineError::Extraction(_)), "got {err:?}");
    }

    #[test]
    fn test_compressed_pages_still_extract() {
        let pdf = pdf_with_pages(&[&["Alpha"], &["Beta"]]);
        let mut doc = lopdf::Document::load_mem(&pdf).unwrap();
        doc.compress();
        let mut compressed = Vec::new();
        doc.save_to(&mut compressed).unwrap();

        let text = extract_text(&compressed).unwrap();
        assert!(text.contains("Alpha") && text.contains("Beta"), "text was {text:?}");
    }

    #[test]
    fn test_non_pdf_bytes_are_extraction_error() {
        let err = extract_text(b"this is definitely not a pdf").unwrap_err();
        assert!(matches!(err, PipelineError::Extraction(_)));
    }
}
