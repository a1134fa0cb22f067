use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A file directly inside a listed directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntry {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create the file, or truncate it if it exists
    Create,
    /// Create the file if missing and write at the end
    Append,
}

/// Primitive file operations a document store is built on.
///
/// Implementations do no validation of their own beyond what the backing
/// store enforces; argument checks live in the facade.
pub trait Storage: Send + Sync {
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Create `path` and any missing ancestors
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Open `path` in `mode`, write all of `data` and close it again
    fn write_bytes(&self, path: &Path, data: &[u8], mode: WriteMode) -> Result<()>;

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Files directly inside `dir`; subdirectories are skipped
    fn list_files(&self, dir: &Path) -> Result<Vec<StorageEntry>>;

    fn remove_file(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
}
