//! Shared types and traits for document storage.
//!
//! Backends implement [`storage::Storage`]; the facade that callers use
//! implements [`filesystem::FileSystem`] and [`filesystem::AsyncFileSystem`].

pub mod document;
pub mod filesystem;
pub mod names;
pub mod storage;
pub mod write_result;

pub use document::{BuildError, Document, DocumentBuilder, NULL_DOCUMENT_NAME};
pub use filesystem::{AsyncFileSystem, FileInformation, FileSystem, ReadLinesError};
pub use storage::{Storage, StorageEntry, WriteMode};
pub use write_result::{WriteError, WriteFileResult};
