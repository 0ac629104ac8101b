use bidscan_core::error::BidscanError;
use bidscan_core::extraction::pdftotext::PdftotextExtractor;
use bidscan_core::extraction::{
    extract_full_text_from_path, extract_word_positions, page_count,
};
use std::path::Path;

use crate::output;

/// Extraction problems are logged and yield empty output, not an error.
pub fn text(pdf_file: &Path, layout: bool) -> Result<(), BidscanError> {
    let extractor = PdftotextExtractor::new().with_layout(layout);
    print!("{}", extract_full_text_from_path(&extractor, pdf_file));
    Ok(())
}

pub fn pages(pdf_file: &Path) -> Result<(), BidscanError> {
    let pdf_bytes = read_pdf(pdf_file)?;
    println!("{}", page_count(&PdftotextExtractor::new(), &pdf_bytes));
    Ok(())
}

pub fn words(pdf_file: &Path) -> Result<(), BidscanError> {
    let pdf_bytes = read_pdf(pdf_file)?;
    let words = extract_word_positions(&PdftotextExtractor::new(), &pdf_bytes);
    output::json::print(&words)
}

pub(crate) fn read_pdf(path: &Path) -> Result<Vec<u8>, BidscanError> {
    if !path.exists() {
        return Err(BidscanError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read(path)?)
}
