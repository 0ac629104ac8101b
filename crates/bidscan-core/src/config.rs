use std::path::{Path, PathBuf};

use crate::credentials::JsonCredentialStore;
use crate::error::BidscanError;
use crate::store::blob::FsBlobStore;
use crate::store::JsonRecordStore;

pub const DEFAULT_DATA_DIR: &str = "./bidscan-data";

/// Locations of everything bidscan persists, all below one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_DATA_DIR)
    }
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
        }
    }

    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join("records.json")
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join("credentials.json")
    }

    /// Root under which document files are stored per project.
    pub fn blob_root(&self) -> PathBuf {
        self.data_dir.join("storage")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn open_records(&self) -> Result<JsonRecordStore, BidscanError> {
        JsonRecordStore::open(self.records_path())
    }

    pub fn open_blobs(&self) -> FsBlobStore {
        FsBlobStore::new(self.blob_root())
    }

    pub fn open_credentials(&self) -> Result<JsonCredentialStore, BidscanError> {
        JsonCredentialStore::open(self.credentials_path())
    }
}
