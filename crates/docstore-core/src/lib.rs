//! Document storage facade.
//!
//! [`FileStore`] validates arguments, prepares directories and reports
//! outcomes for every operation, delegating the actual I/O to a
//! [`Storage`](docstore_platform::Storage) backend chosen at construction.

pub mod config;
pub mod store;

pub use config::{Backend, StoreConfig};
pub use store::FileStore;

pub use docstore_platform::{
    AsyncFileSystem, BuildError, Document, DocumentBuilder, FileInformation, FileSystem,
    ReadLinesError, WriteError, WriteFileResult, NULL_DOCUMENT_NAME,
};
