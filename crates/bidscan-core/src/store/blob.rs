use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BidscanError;

/// File storage for uploaded and ingested documents.
pub trait BlobStore {
    /// Save `bytes` under the project's storage area, returning the stored path.
    fn save(&self, project_id: u64, filename: &str, bytes: &[u8]) -> Result<PathBuf, BidscanError>;

    /// Read a previously stored file back.
    fn read(&self, path: &Path) -> Result<Vec<u8>, BidscanError>;

    fn exists(&self, path: &Path) -> bool;
}

/// Stores files as `<root>/projects/<project_id>/<filename>`.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsBlobStore { root: root.into() }
    }

    pub fn project_dir(&self, project_id: u64) -> PathBuf {
        self.root.join("projects").join(project_id.to_string())
    }
}

impl BlobStore for FsBlobStore {
    fn save(&self, project_id: u64, filename: &str, bytes: &[u8]) -> Result<PathBuf, BidscanError> {
        // Only the final component is kept so a filename cannot escape the project dir.
        let name = Path::new(filename)
            .file_name()
            .ok_or(BidscanError::MissingField("filename"))?;

        let dir = self.project_dir(project_id);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(name);
        std::fs::write(&path, bytes)?;
        debug!(path = %path.display(), size = bytes.len(), "stored file");
        Ok(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, BidscanError> {
        if !self.exists(path) {
            return Err(BidscanError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(std::fs::read(path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
