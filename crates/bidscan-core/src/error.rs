use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BidscanError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("Document with ID {id} not found")]
    DocumentNotFound { id: u64 },

    #[error("Project with ID {id} not found")]
    ProjectNotFound { id: u64 },

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("unknown document type '{0}'. Expected one of: plans, specifications, addendum, contract, bid_document, other, unknown")]
    InvalidDocumentType(String),

    #[error("mailbox error: {0}")]
    Mailbox(String),

    #[error("email account '{account}' is not authenticated")]
    NotAuthenticated { account: String },

    #[error("record store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BidscanError {
    /// True for identity lookups that missed (document, project or stored file).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BidscanError::DocumentNotFound { .. }
                | BidscanError::ProjectNotFound { .. }
                | BidscanError::FileNotFound { .. }
        )
    }
}
