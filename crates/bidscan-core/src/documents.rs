//! Operations on stored documents and projects.

use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::doctype::{classify_upload, mime_type_for};
use crate::error::BidscanError;
use crate::extraction::{extract_full_text, PdfExtractor};
use crate::mining::mine_located;
use crate::model::{
    DocumentRecord, DocumentText, DocumentType, NewDocument, ProjectSummary, SectionAnalysis,
};
use crate::section::locate_section;
use crate::store::blob::BlobStore;
use crate::store::RecordStore;

/// Store an uploaded file and record it against an existing project.
///
/// Without an explicit `document_type` the type is guessed from the filename.
pub fn upload_document(
    records: &mut dyn RecordStore,
    blobs: &dyn BlobStore,
    project_id: u64,
    filename: &str,
    bytes: &[u8],
    document_type: Option<DocumentType>,
) -> Result<DocumentRecord, BidscanError> {
    if records.get_project(project_id)?.is_none() {
        return Err(BidscanError::ProjectNotFound { id: project_id });
    }
    if filename.trim().is_empty() {
        return Err(BidscanError::MissingField("filename"));
    }

    let file_path = blobs.save(project_id, filename, bytes)?;
    let stored_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());

    let document = records.insert_document(NewDocument {
        project_id,
        filename: stored_name,
        original_filename: filename.to_string(),
        file_path,
        file_size: bytes.len() as u64,
        mime_type: mime_type_for(filename).to_string(),
        document_type: document_type.unwrap_or_else(|| classify_upload(filename)),
    })?;

    info!(document_id = document.id, project_id, "uploaded document");
    Ok(document)
}

/// Load a document's record and file bytes, failing if either is missing.
fn load_document(
    records: &dyn RecordStore,
    blobs: &dyn BlobStore,
    document_id: u64,
) -> Result<(DocumentRecord, Vec<u8>), BidscanError> {
    let record = records
        .get_document(document_id)?
        .ok_or(BidscanError::DocumentNotFound { id: document_id })?;
    let bytes = blobs.read(&record.file_path)?;
    Ok((record, bytes))
}

/// Full extracted text of a stored document.
pub fn document_text(
    records: &dyn RecordStore,
    blobs: &dyn BlobStore,
    extractor: &dyn PdfExtractor,
    document_id: u64,
) -> Result<DocumentText, BidscanError> {
    let (_, bytes) = load_document(records, blobs, document_id)?;
    Ok(DocumentText {
        document_id,
        text: extract_full_text(extractor, &bytes),
    })
}

/// Locate a section in a stored document and mine it.
pub fn analyze_section(
    records: &dyn RecordStore,
    blobs: &dyn BlobStore,
    extractor: &dyn PdfExtractor,
    document_id: u64,
    section_name: &str,
) -> Result<SectionAnalysis, BidscanError> {
    crate::require_section_name(section_name)?;
    let (_, bytes) = load_document(records, blobs, document_id)?;
    let text = extract_full_text(extractor, &bytes);
    let section = locate_section(&text, section_name);
    debug!(document_id, found = section.found, "section lookup");
    let analysis = mine_located(&section);

    Ok(SectionAnalysis {
        document_id,
        section_name: section.section_name,
        text: section.text,
        analysis,
    })
}

/// Project fields with document counts per type.
pub fn project_summary(
    records: &dyn RecordStore,
    project_id: u64,
) -> Result<ProjectSummary, BidscanError> {
    let project = records
        .get_project(project_id)?
        .ok_or(BidscanError::ProjectNotFound { id: project_id })?;
    let documents = records.documents_for_project(project_id)?;

    let mut document_counts: BTreeMap<DocumentType, usize> = BTreeMap::new();
    for document in &documents {
        *document_counts.entry(document.document_type).or_default() += 1;
    }

    Ok(ProjectSummary {
        project,
        document_count: documents.len(),
        document_counts,
    })
}
