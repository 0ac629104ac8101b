pub mod blob;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::BidscanError;
use crate::model::{DocumentRecord, NewDocument, NewProject, ProjectRecord};

/// Persistence for project and document records.
///
/// Each insert is committed on its own; there are no multi-record transactions.
pub trait RecordStore {
    fn get_project(&self, id: u64) -> Result<Option<ProjectRecord>, BidscanError>;

    /// Find the project created from the email carrying this synthetic marker.
    fn find_project_by_marker(&self, marker: &str) -> Result<Option<ProjectRecord>, BidscanError>;

    fn insert_project(&mut self, project: NewProject) -> Result<ProjectRecord, BidscanError>;

    fn get_document(&self, id: u64) -> Result<Option<DocumentRecord>, BidscanError>;

    fn documents_for_project(&self, project_id: u64) -> Result<Vec<DocumentRecord>, BidscanError>;

    fn insert_document(&mut self, document: NewDocument) -> Result<DocumentRecord, BidscanError>;
}

/// In-memory record store. Ids are assigned sequentially from 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryRecordStore {
    projects: Vec<ProjectRecord>,
    documents: Vec<DocumentRecord>,
    #[serde(default)]
    last_project_id: u64,
    #[serde(default)]
    last_document_id: u64,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }
}

impl RecordStore for MemoryRecordStore {
    fn get_project(&self, id: u64) -> Result<Option<ProjectRecord>, BidscanError> {
        Ok(self.projects.iter().find(|p| p.id == id).cloned())
    }

    fn find_project_by_marker(&self, marker: &str) -> Result<Option<ProjectRecord>, BidscanError> {
        Ok(self
            .projects
            .iter()
            .find(|p| p.email_subject.as_deref() == Some(marker))
            .cloned())
    }

    fn insert_project(&mut self, project: NewProject) -> Result<ProjectRecord, BidscanError> {
        self.last_project_id += 1;
        let now = Utc::now();
        let record = ProjectRecord {
            id: self.last_project_id,
            name: project.name,
            bid_due_date: project.bid_due_date,
            sender_name: project.sender_name,
            sender_email: project.sender_email,
            email_subject: project.email_subject,
            email_body: project.email_body,
            created_at: now,
            updated_at: now,
        };
        self.projects.push(record.clone());
        Ok(record)
    }

    fn get_document(&self, id: u64) -> Result<Option<DocumentRecord>, BidscanError> {
        Ok(self.documents.iter().find(|d| d.id == id).cloned())
    }

    fn documents_for_project(&self, project_id: u64) -> Result<Vec<DocumentRecord>, BidscanError> {
        Ok(self
            .documents
            .iter()
            .filter(|d| d.project_id == project_id)
            .cloned()
            .collect())
    }

    fn insert_document(&mut self, document: NewDocument) -> Result<DocumentRecord, BidscanError> {
        if !self.projects.iter().any(|p| p.id == document.project_id) {
            return Err(BidscanError::ProjectNotFound {
                id: document.project_id,
            });
        }
        self.last_document_id += 1;
        let record = DocumentRecord {
            id: self.last_document_id,
            project_id: document.project_id,
            filename: document.filename,
            original_filename: document.original_filename,
            file_path: document.file_path,
            file_size: document.file_size,
            mime_type: document.mime_type,
            document_type: document.document_type,
            created_at: Utc::now(),
        };
        self.documents.push(record.clone());
        Ok(record)
    }
}

/// Record store persisted as a single JSON file, rewritten after every insert.
pub struct JsonRecordStore {
    path: PathBuf,
    records: MemoryRecordStore,
}

impl JsonRecordStore {
    /// Open the store at `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, BidscanError> {
        let path = path.into();
        let records = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)
                .map_err(|e| BidscanError::Store(format!("{}: {e}", path.display())))?
        } else {
            MemoryRecordStore::new()
        };
        Ok(JsonRecordStore { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn commit(&self) -> Result<(), BidscanError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "committed records");
        Ok(())
    }
}

impl RecordStore for JsonRecordStore {
    fn get_project(&self, id: u64) -> Result<Option<ProjectRecord>, BidscanError> {
        self.records.get_project(id)
    }

    fn find_project_by_marker(&self, marker: &str) -> Result<Option<ProjectRecord>, BidscanError> {
        self.records.find_project_by_marker(marker)
    }

    fn insert_project(&mut self, project: NewProject) -> Result<ProjectRecord, BidscanError> {
        let record = self.records.insert_project(project)?;
        self.commit()?;
        Ok(record)
    }

    fn get_document(&self, id: u64) -> Result<Option<DocumentRecord>, BidscanError> {
        self.records.get_document(id)
    }

    fn documents_for_project(&self, project_id: u64) -> Result<Vec<DocumentRecord>, BidscanError> {
        self.records.documents_for_project(project_id)
    }

    fn insert_document(&mut self, document: NewDocument) -> Result<DocumentRecord, BidscanError> {
        let record = self.records.insert_document(document)?;
        self.commit()?;
        Ok(record)
    }
}
