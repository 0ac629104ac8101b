pub mod config;
pub mod credentials;
pub mod doctype;
pub mod documents;
pub mod email;
pub mod error;
pub mod extraction;
pub mod metadata;
pub mod mining;
pub mod model;
pub mod section;
pub mod store;

use error::BidscanError;
use extraction::PdfExtractor;
use model::SectionReport;

pub use documents::{analyze_section, document_text, project_summary, upload_document};
pub use email::{email_details, ingest_candidates};
pub use metadata::assemble_metadata;
pub use mining::{mine, mine_located};
pub use section::locate_section;

/// Locate `section_name` in the text of a PDF and mine quantities and
/// materials from whatever was located.
///
/// A missing section yields the "not found" sentinel and an empty analysis.
pub fn analyze_pdf_section(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    section_name: &str,
) -> Result<SectionReport, BidscanError> {
    require_section_name(section_name)?;
    let text = extraction::extract_full_text(extractor, pdf_bytes);
    analyze_text_section(&text, section_name)
}

/// Same as [`analyze_pdf_section`] over already extracted text.
pub fn analyze_text_section(
    full_text: &str,
    section_name: &str,
) -> Result<SectionReport, BidscanError> {
    require_section_name(section_name)?;
    let section = locate_section(full_text, section_name);
    let analysis = mine_located(&section);
    Ok(SectionReport { section, analysis })
}

pub(crate) fn require_section_name(section_name: &str) -> Result<(), BidscanError> {
    if section_name.trim().is_empty() {
        return Err(BidscanError::MissingField("section name"));
    }
    Ok(())
}
