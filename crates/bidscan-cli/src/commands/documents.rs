use bidscan_core::config::Config;
use bidscan_core::error::BidscanError;
use bidscan_core::extraction::pdftotext::PdftotextExtractor;
use bidscan_core::model::DocumentType;
use std::path::Path;

use crate::output;

pub fn metadata(config: &Config, document_id: u64) -> Result<(), BidscanError> {
    let records = config.open_records()?;
    let blobs = config.open_blobs();
    let extractor = PdftotextExtractor::new();
    let metadata = bidscan_core::assemble_metadata(&records, &blobs, &extractor, document_id)?;
    output::json::print(&metadata)
}

pub fn upload(
    config: &Config,
    project_id: u64,
    file: &Path,
    document_type: Option<&str>,
) -> Result<(), BidscanError> {
    let document_type = document_type
        .map(|label| label.parse::<DocumentType>())
        .transpose()?;
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let bytes = std::fs::read(file)?;

    let mut records = config.open_records()?;
    let blobs = config.open_blobs();
    let document = bidscan_core::upload_document(
        &mut records,
        &blobs,
        project_id,
        &filename,
        &bytes,
        document_type,
    )?;

    eprintln!(
        "Uploaded {} as document {} ({})",
        document.original_filename, document.id, document.document_type
    );
    output::json::print(&document)
}

pub fn summary(config: &Config, project_id: u64, output_format: &str) -> Result<(), BidscanError> {
    let records = config.open_records()?;
    let summary = bidscan_core::project_summary(&records, project_id)?;

    match output_format {
        "json" => output::json::print(&summary)?,
        _ => println!("{}", output::table::format_summary(&summary)),
    }
    Ok(())
}
