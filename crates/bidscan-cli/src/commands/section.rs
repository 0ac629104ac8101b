use bidscan_core::error::BidscanError;
use bidscan_core::extraction::pdftotext::PdftotextExtractor;
use std::path::Path;

use crate::commands::extract::read_pdf;
use crate::output;

pub fn run(pdf_file: &Path, section_name: &str, output_format: &str) -> Result<(), BidscanError> {
    let pdf_bytes = read_pdf(pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let report = bidscan_core::analyze_pdf_section(&pdf_bytes, &extractor, section_name)?;

    match output_format {
        "json" => output::json::print(&report)?,
        _ => println!("{}", output::table::format_section_report(&report)),
    }
    Ok(())
}

pub fn mine(text_file: &Path, output_format: &str) -> Result<(), BidscanError> {
    let text = std::fs::read_to_string(text_file)?;
    let result = bidscan_core::mine(&text);

    match output_format {
        "json" => output::json::print(&result)?,
        _ => println!("{}", output::table::format_mining(&result)),
    }
    Ok(())
}
