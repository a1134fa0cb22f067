use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::Document;
use crate::write_result::WriteFileResult;

/// One file in a directory listing.
///
/// `size` is whole megabytes, rounded down, so files under 1 MiB report "0".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInformation {
    pub name: String,
    pub size: String,
}

impl FileInformation {
    pub fn from_bytes(name: impl Into<String>, size_bytes: u64) -> Self {
        let kilobytes = size_bytes / 1024;
        let megabytes = kilobytes / 1024;
        Self {
            name: name.into(),
            size: megabytes.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadLinesError {
    #[error("path cannot be empty")]
    InvalidArgument,

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },
}

/// Document-oriented file operations.
///
/// Blank path arguments are never an error: each operation documents the
/// value it returns for them instead.
pub trait FileSystem: Send + Sync {
    /// Write `document` to `directory`, replacing any existing file of the
    /// same name. The directory is created if missing.
    fn write(&self, directory: &str, document: &Document) -> WriteFileResult;

    /// Append `document`'s payload to the file of the same name in
    /// `directory`, creating the file and directory if missing.
    fn append(&self, directory: &str, document: &Document) -> WriteFileResult;

    /// Files directly inside `directory`. Empty when the directory is blank,
    /// missing or not a directory.
    fn list(&self, directory: &str) -> Vec<FileInformation>;

    /// True if `path` is an existing file or directory
    fn exists(&self, path: &str) -> bool;

    /// Remove a file, or a directory and everything under it. Missing and
    /// blank paths are ignored.
    fn delete(&self, path: &str);

    /// The document stored at `path`, or `None` if there is no such file.
    fn find_document(&self, path: &str) -> Option<Document>;

    /// Like [`find_document`](Self::find_document) but returns the
    /// [`Document::null`] sentinel when nothing is found.
    fn get_document(&self, path: &str) -> Document {
        self.find_document(path).unwrap_or_else(Document::null)
    }

    fn read(&self, path: &str) -> Document {
        self.get_document(path)
    }

    fn read_all_lines(&self, path: &str) -> Result<Vec<String>, ReadLinesError>;

    /// Move a file. Fails without touching either side if `destination`
    /// already exists.
    fn move_file(&self, source: &str, destination: &str) -> bool;

    /// Move a file, deleting an existing file at `destination` first.
    fn move_with_overwrite(&self, source: &str, destination: &str) -> bool;

    /// Rename a file within its directory. Fails if `new_name` is not a
    /// valid file name or is already taken.
    fn rename(&self, path: &str, new_name: &str) -> bool;
}

/// Non-blocking forms of [`FileSystem`], with identical results.
///
/// An operation that cannot run because its runtime is shutting down reports
/// the same failure value its blocking form uses for an I/O error.
#[async_trait]
pub trait AsyncFileSystem: Send + Sync {
    async fn write_async(&self, directory: &str, document: &Document) -> WriteFileResult;
    async fn append_async(&self, directory: &str, document: &Document) -> WriteFileResult;
    async fn list_async(&self, directory: &str) -> Vec<FileInformation>;
    async fn exists_async(&self, path: &str) -> bool;
    async fn delete_async(&self, path: &str);
    async fn find_document_async(&self, path: &str) -> Option<Document>;
    async fn get_document_async(&self, path: &str) -> Document;
    async fn read_async(&self, path: &str) -> Document;
    async fn read_all_lines_async(&self, path: &str) -> Result<Vec<String>, ReadLinesError>;
    async fn move_file_async(&self, source: &str, destination: &str) -> bool;
    async fn move_with_overwrite_async(&self, source: &str, destination: &str) -> bool;
    async fn rename_async(&self, path: &str, new_name: &str) -> bool;
}
