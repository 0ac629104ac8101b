pub mod pdftotext;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::BidscanError;
use crate::model::PositionedWord;

/// Text extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageText {
    pub page_number: usize,
    pub text: String,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageText per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, BidscanError>;

    /// Extract every word with its page number and bounding box.
    fn extract_words(&self, pdf_bytes: &[u8]) -> Result<Vec<PositionedWord>, BidscanError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Full text of a PDF, pages concatenated in order with no added separators.
///
/// Never fails: any extraction error is logged and yields an empty string.
pub fn extract_full_text(extractor: &dyn PdfExtractor, pdf_bytes: &[u8]) -> String {
    match extractor.extract_pages(pdf_bytes) {
        Ok(pages) => {
            debug!(
                backend = extractor.backend_name(),
                pages = pages.len(),
                "extracted text"
            );
            pages.into_iter().map(|p| p.text).collect()
        }
        Err(e) => {
            warn!(backend = extractor.backend_name(), "error extracting text from PDF: {e}");
            String::new()
        }
    }
}

/// Positioned words of a PDF; empty on any extraction error.
pub fn extract_word_positions(
    extractor: &dyn PdfExtractor,
    pdf_bytes: &[u8],
) -> Vec<PositionedWord> {
    extractor.extract_words(pdf_bytes).unwrap_or_else(|e| {
        warn!(
            backend = extractor.backend_name(),
            "error extracting word positions from PDF: {e}"
        );
        Vec::new()
    })
}

/// Number of pages in a PDF; 0 on any extraction error.
pub fn page_count(extractor: &dyn PdfExtractor, pdf_bytes: &[u8]) -> usize {
    extractor
        .extract_pages(pdf_bytes)
        .map(|pages| pages.len())
        .unwrap_or_else(|e| {
            warn!(backend = extractor.backend_name(), "error counting PDF pages: {e}");
            0
        })
}

/// Full text and page count from a single extraction pass; ("", 0) on error.
pub fn extract_text_and_page_count(
    extractor: &dyn PdfExtractor,
    pdf_bytes: &[u8],
) -> (String, usize) {
    match extractor.extract_pages(pdf_bytes) {
        Ok(pages) => {
            let count = pages.len();
            (pages.into_iter().map(|p| p.text).collect(), count)
        }
        Err(e) => {
            warn!(backend = extractor.backend_name(), "error extracting text from PDF: {e}");
            (String::new(), 0)
        }
    }
}

/// Read a PDF from disk and extract its full text. Unreadable files yield "".
pub fn extract_full_text_from_path(extractor: &dyn PdfExtractor, path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => extract_full_text(extractor, &bytes),
        Err(e) => {
            warn!("error reading PDF {}: {e}", path.display());
            String::new()
        }
    }
}
