use std::path::{Path, PathBuf};

use thiserror::Error;

/// Reasons a write or append was refused or failed.
///
/// The display text is the message reported through [`WriteFileResult`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("No file name provided")]
    NoFileName,

    #[error("No directory provided")]
    NoDirectory,

    #[error("File name contains invalid characters")]
    InvalidFileName,

    #[error("An error occurred creating directory structure [{cause}]")]
    DirectoryCreationFailed { cause: String },

    #[error("No file data provided; cannot write file.")]
    NoFileData,

    #[error("An error occurred writing the file [{cause}]")]
    WriteFailed { cause: String },
}

/// Outcome of a write or append.
///
/// Errors are kept in the order they were detected. The full file path is
/// only set when the bytes were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteFileResult {
    errors: Vec<WriteError>,
    full_file_path: Option<PathBuf>,
}

impl WriteFileResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failed(error: WriteError) -> Self {
        let mut result = Self::new();
        result.add_error(error);
        result
    }

    pub fn succeeded(full_file_path: PathBuf) -> Self {
        Self {
            errors: Vec::new(),
            full_file_path: Some(full_file_path),
        }
    }

    pub fn add_error(&mut self, error: WriteError) {
        self.errors.push(error);
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[WriteError] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn full_file_path(&self) -> Option<&Path> {
        self.full_file_path.as_deref()
    }
}
