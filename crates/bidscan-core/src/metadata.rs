use tracing::warn;

use crate::error::BidscanError;
use crate::extraction::{extract_text_and_page_count, PdfExtractor};
use crate::model::{DocumentMetadata, DocumentRecord};
use crate::store::blob::BlobStore;
use crate::store::RecordStore;

/// Number of characters kept in a metadata text sample.
pub const TEXT_SAMPLE_CHARS: usize = 1000;

/// Stored record fields plus a text sample and page count for one document.
///
/// A missing record is `DocumentNotFound`. A missing or unreadable file is
/// not an error: the sample is empty and the page count 0.
pub fn assemble_metadata(
    records: &dyn RecordStore,
    blobs: &dyn BlobStore,
    extractor: &dyn PdfExtractor,
    document_id: u64,
) -> Result<DocumentMetadata, BidscanError> {
    let record = records
        .get_document(document_id)?
        .ok_or(BidscanError::DocumentNotFound { id: document_id })?;

    let (text, page_count) = match blobs.read(&record.file_path) {
        Ok(bytes) => extract_text_and_page_count(extractor, &bytes),
        Err(e) => {
            warn!(document_id, "cannot read document file: {e}");
            (String::new(), 0)
        }
    };

    Ok(assemble(record, &text, page_count))
}

/// Combine a record with already extracted text.
pub fn assemble(record: DocumentRecord, full_text: &str, page_count: usize) -> DocumentMetadata {
    DocumentMetadata {
        record,
        text_sample: text_sample(full_text),
        page_count,
    }
}

/// The first [`TEXT_SAMPLE_CHARS`] characters, cut without regard to words.
pub fn text_sample(full_text: &str) -> String {
    full_text.chars().take(TEXT_SAMPLE_CHARS).collect()
}
