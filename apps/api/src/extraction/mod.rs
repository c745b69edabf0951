//! Résumé text extraction.
//!
//! The pipeline only sees the `TextExtractor` trait. `AppState` carries an
//! `Arc<dyn TextExtractor>` so handlers and tests can swap the backend.

use thiserror::Error;

pub mod pdf;

pub use pdf::PdfTextExtractor;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("uploaded file is empty")]
    Empty,

    #[error("not a readable PDF: {0}")]
    Parse(String),

    #[error("PDF is encrypted and no password was supplied")]
    Encrypted,

    #[error("PDF contains no pages")]
    NoPages,

    #[error("text could not be extracted from any of the {pages} pages")]
    NoReadablePages { pages: usize },
}

/// Converts an uploaded document into plain text.
///
/// Implementations are synchronous and CPU-bound; async callers run them on
/// the blocking pool.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}
