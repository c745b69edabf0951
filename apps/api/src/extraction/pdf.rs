//! PDF text extraction.
//!
//! Primary pass: lopdf, one page at a time, in page-number order.
//! Pages that fail are skipped with a warning. When the page pass yields no
//! text at all, either because every page failed or because every page was
//! blank, pdf-extract gets one try on the whole document. A blank document
//! that the fallback cannot read is image-only and yields `""`; a document
//! whose pages all failed and that the fallback cannot read is an error.

use std::fmt::Display;
use std::panic;

use lopdf::Document;
use tracing::{debug, warn};

use super::{ExtractionError, TextExtractor};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Production extractor backed by lopdf with a pdf-extract fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        extract_text(bytes)
    }
}

/// Extracts the text of every page, joined with `\n` between pages.
///
/// Returns an empty string for documents without a text layer (no OCR).
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::Empty);
    }
    if !has_pdf_header(bytes) {
        return Err(ExtractionError::Parse("missing %PDF- header".to_string()));
    }

    let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Parse(e.to_string()))?;

    if doc.is_encrypted() {
        return Err(ExtractionError::Encrypted);
    }

    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(ExtractionError::NoPages);
    }
    debug!("PDF loaded: {} pages", pages.len());

    // get_pages() is a BTreeMap keyed by page number, so iteration is document order.
    let page_pass = join_pages(
        pages
            .keys()
            .map(|&page_number| (page_number, doc.extract_text(&[page_number]))),
    );

    with_fallback(page_pass, || fallback_extract(bytes))
}

/// Decides between the page pass and the whole-document fallback.
///
/// The fallback runs only when the page pass produced no text.
fn with_fallback<F>(
    page_pass: Result<String, ExtractionError>,
    fallback: F,
) -> Result<String, ExtractionError>
where
    F: FnOnce() -> String,
{
    match page_pass {
        Ok(text) if !text.is_empty() => Ok(text),
        Ok(_) => {
            debug!("No text from page pass, trying whole-document fallback");
            Ok(fallback())
        }
        Err(e @ ExtractionError::NoReadablePages { .. }) => {
            warn!("{e}; trying whole-document fallback");
            let text = fallback();
            if text.is_empty() {
                Err(e)
            } else {
                Ok(text)
            }
        }
        Err(e) => Err(e),
    }
}

fn has_pdf_header(bytes: &[u8]) -> bool {
    // The header may be preceded by up to 1024 bytes of junk.
    let window = &bytes[..bytes.len().min(1024 + PDF_MAGIC.len())];
    window
        .windows(PDF_MAGIC.len())
        .any(|candidate| candidate == PDF_MAGIC)
}

/// Joins per-page extraction results, skipping pages that failed.
///
/// Each page loses its trailing whitespace before joining. A document whose
/// pages are all blank produces `""`, not a run of newlines.
fn join_pages<E, I>(pages: I) -> Result<String, ExtractionError>
where
    E: Display,
    I: IntoIterator<Item = (u32, Result<String, E>)>,
{
    let mut texts = Vec::new();
    let mut total = 0;

    for (page_number, result) in pages {
        total += 1;
        match result {
            Ok(text) => texts.push(text.trim_end().to_string()),
            Err(e) => warn!("Skipping PDF page {page_number}: {e}"),
        }
    }

    if texts.is_empty() {
        return Err(ExtractionError::NoReadablePages { pages: total });
    }

    if texts.iter().all(|t| t.trim().is_empty()) {
        return Ok(String::new());
    }

    Ok(texts.join("\n"))
}

/// Whole-document extraction through pdf-extract.
///
/// pdf-extract panics on some inputs lopdf accepts; a panic or error here
/// means "no text" and the caller decides what that implies.
fn fallback_extract(bytes: &[u8]) -> String {
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(Ok(_)) => String::new(),
        Ok(Err(e)) => {
            warn!("Fallback PDF extraction failed: {e}");
            String::new()
        }
        Err(_) => {
            warn!("Fallback PDF extraction panicked");
            String::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Builds a PDF with one page per entry; `None` yields a page with an
    /// empty content stream.
    pub fn pdf_with_pages(pages: &[Option<&str>]) -> Vec<u8> {
        save(document_with_pages(pages))
    }

    /// A one-page PDF whose trailer declares Standard security handler encryption.
    pub fn encrypted_pdf() -> Vec<u8> {
        let mut doc = document_with_pages(&[Some("Confidential resume")]);
        doc.trailer.set(
            "Encrypt",
            dictionary! {
                "Filter" => "Standard",
                "V" => 1,
                "R" => 2,
                "Length" => 40,
                "O" => Object::string_literal(vec![0x4f_u8; 32]),
                "U" => Object::string_literal(vec![0x55_u8; 32]),
                "P" => -44,
            },
        );
        doc.trailer.set(
            "ID",
            vec![
                Object::string_literal(vec![0x01_u8; 16]),
                Object::string_literal(vec![0x01_u8; 16]),
            ],
        );
        save(doc)
    }

    fn save(mut doc: Document) -> Vec<u8> {
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("serialize fixture PDF");
        bytes
    }

    fn document_with_pages(pages: &[Option<&str>]) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page_text in pages {
            let operations = match page_text {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content stream"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }
}
