//! Filename-based document type classification.
//!
//! Each table is scanned top to bottom; the first row with a keyword
//! contained in the lower-cased filename wins.

use std::path::Path;

use crate::model::DocumentType;

type KeywordTable = &'static [(&'static [&'static str], DocumentType)];

/// Keywords applied to PDF attachments pulled from bid invitation emails.
pub const ATTACHMENT_KEYWORDS: KeywordTable = &[
    (&["plan", "drawing"], DocumentType::Plans),
    (&["spec", "specification"], DocumentType::Specifications),
    (&["addendum", "amendment"], DocumentType::Addendum),
];

/// Keywords applied to files uploaded directly into a project.
pub const UPLOAD_KEYWORDS: KeywordTable = &[
    (&["plan", "drawing", "dwg"], DocumentType::Plans),
    (&["spec", "specification"], DocumentType::Specifications),
    (&["addendum", "amendment"], DocumentType::Addendum),
    (&["contract", "agreement"], DocumentType::Contract),
    (&["rfp", "request for proposal", "bid"], DocumentType::BidDocument),
];

/// Classify an email attachment; unmatched names are `Unknown`.
pub fn classify_attachment(filename: &str) -> DocumentType {
    classify_with(ATTACHMENT_KEYWORDS, filename).unwrap_or(DocumentType::Unknown)
}

/// Classify an uploaded file; unmatched names are `Other`.
pub fn classify_upload(filename: &str) -> DocumentType {
    classify_with(UPLOAD_KEYWORDS, filename).unwrap_or(DocumentType::Other)
}

fn classify_with(table: KeywordTable, filename: &str) -> Option<DocumentType> {
    let lower = filename.to_lowercase();
    table
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, doc_type)| *doc_type)
}

/// Lower-cased extension including the dot, or "" when there is none.
pub fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

pub fn is_pdf_file(filename: &str) -> bool {
    file_extension(filename) == ".pdf"
}

/// Mime type stored with a document record.
pub fn mime_type_for(filename: &str) -> &'static str {
    match file_extension(filename).as_str() {
        ".pdf" => "application/pdf",
        ".txt" => "text/plain",
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".dwg" => "image/vnd.dwg",
        ".doc" => "application/msword",
        ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_classification() {
        assert_eq!(classify_attachment("Site_Plans_Rev2.PDF"), DocumentType::Plans);
        assert_eq!(classify_attachment("Drawing Set.pdf"), DocumentType::Plans);
        assert_eq!(classify_attachment("Project Specs.pdf"), DocumentType::Specifications);
        assert_eq!(classify_attachment("Addendum 1.pdf"), DocumentType::Addendum);
        assert_eq!(classify_attachment("Bid Form.pdf"), DocumentType::Unknown);
    }

    #[test]
    fn test_first_row_wins() {
        // matches both "plan" and "spec"
        assert_eq!(classify_attachment("plan-specs.pdf"), DocumentType::Plans);
    }

    #[test]
    fn test_upload_classification() {
        assert_eq!(classify_upload("A-101.dwg"), DocumentType::Plans);
        assert_eq!(classify_upload("Owner Agreement.pdf"), DocumentType::Contract);
        assert_eq!(classify_upload("RFP 2025-14.pdf"), DocumentType::BidDocument);
        assert_eq!(classify_upload("bid_tabulation.pdf"), DocumentType::BidDocument);
        assert_eq!(classify_upload("photo.jpg"), DocumentType::Other);
    }

    #[test]
    fn test_pdf_detection() {
        assert!(is_pdf_file("SPECS.PDF"));
        assert!(is_pdf_file("a.b.pdf"));
        assert!(!is_pdf_file("specs.pdf.zip"));
        assert!(!is_pdf_file("pdf"));
        assert_eq!(file_extension("readme"), "");
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type_for("x.PDF"), "application/pdf");
        assert_eq!(mime_type_for("x.bin"), "application/octet-stream");
        assert_eq!(mime_type_for("notes.txt"), "text/plain");
        assert_eq!(mime_type_for("A-101.dwg"), "image/vnd.dwg");
        assert_eq!(mime_type_for("photo.JPEG"), "image/jpeg");
        assert_eq!(mime_type_for("README"), "application/octet-stream");
    }
}
