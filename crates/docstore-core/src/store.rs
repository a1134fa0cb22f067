use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use docstore_host::HostStorage;
use docstore_memory::MemoryStorage;
use docstore_platform::document::{Document, DocumentBuilder};
use docstore_platform::filesystem::{AsyncFileSystem, FileInformation, FileSystem, ReadLinesError};
use docstore_platform::names;
use docstore_platform::storage::{Storage, WriteMode};
use docstore_platform::write_result::{WriteError, WriteFileResult};

use crate::config::{Backend, StoreConfig};

/// Document store over a [`Storage`] backend.
///
/// Holds no state besides the shared backend, so clones are cheap and may be
/// used from any number of tasks at once. Concurrent writers to the same
/// path are not coordinated.
#[derive(Clone)]
pub struct FileStore {
    storage: Arc<dyn Storage>,
}

impl FileStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Store backed by the host file system
    pub fn host() -> Self {
        Self::new(Arc::new(HostStorage::new()))
    }

    /// Store backed by a fresh in-memory tree
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        match config.backend {
            Backend::Host => Self::host(),
            Backend::Memory => Self::in_memory(),
        }
    }

    // Validation order matters: the directory is created before the payload
    // is checked, so a document without data can still leave a new directory
    // behind. The file itself is never opened in that case.
    fn write_document(
        &self,
        directory: &str,
        document: &Document,
        mode: WriteMode,
    ) -> WriteFileResult {
        if names::is_blank(document.name()) {
            return WriteFileResult::failed(WriteError::NoFileName);
        }
        if names::is_blank(directory) {
            return WriteFileResult::failed(WriteError::NoDirectory);
        }
        if !names::is_valid_file_name(document.name()) {
            return WriteFileResult::failed(WriteError::InvalidFileName);
        }

        let dir = Path::new(directory);
        if !self.storage.is_dir(dir) {
            debug!("creating directory {}", dir.display());
            if let Err(e) = self.storage.create_dir_all(dir) {
                warn!("directory creation failed: {:#}", e);
                return WriteFileResult::failed(WriteError::DirectoryCreationFailed {
                    cause: format!("{:#}", e),
                });
            }
        }

        let Some(data) = document.data() else {
            return WriteFileResult::failed(WriteError::NoFileData);
        };

        let file_path = dir.join(document.name());
        match self.storage.write_bytes(&file_path, data, mode) {
            Ok(()) => {
                debug!("{:?} {} ({} bytes)", mode, file_path.display(), data.len());
                WriteFileResult::succeeded(file_path)
            }
            Err(e) => {
                warn!("write failed: {:#}", e);
                WriteFileResult::failed(WriteError::WriteFailed {
                    cause: format!("{:#}", e),
                })
            }
        }
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.storage.is_dir(path) || self.storage.is_file(path)
    }

    fn is_movable(&self, source: &str, destination: &str) -> bool {
        !names::is_blank(source)
            && !names::is_blank(destination)
            && self.storage.is_file(Path::new(source))
    }

    fn rename_path(&self, from: &Path, to: &Path) -> bool {
        match self.storage.rename(from, to) {
            Ok(()) => {
                debug!("moved {} to {}", from.display(), to.display());
                true
            }
            Err(e) => {
                warn!("move failed: {:#}", e);
                false
            }
        }
    }

    /// Run a synchronous operation on the blocking pool.
    ///
    /// If the runtime is shutting down the operation never runs and
    /// `cancelled` supplies the failure value, given the join error text.
    async fn blocking<T, F, C>(&self, op: F, cancelled: C) -> T
    where
        F: FnOnce(FileStore) -> T + Send + 'static,
        C: FnOnce(String) -> T,
        T: Send + 'static,
    {
        let store = self.clone();
        match tokio::task::spawn_blocking(move || op(store)).await {
            Ok(value) => value,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                warn!("blocking file operation did not run: {}", e);
                cancelled(e.to_string())
            }
        }
    }
}

/// Split text into lines the way a line reader does: `\r\n`, `\n` and a lone
/// `\r` all end a line, a final terminator does not start an empty line, and
/// a leading byte order mark is dropped.
fn split_lines(text: &str) -> Vec<String> {
    let mut rest = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let mut lines = Vec::new();

    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(end) => {
                lines.push(rest[..end].to_string());
                let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + terminator..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    lines
}

impl FileSystem for FileStore {
    fn write(&self, directory: &str, document: &Document) -> WriteFileResult {
        self.write_document(directory, document, WriteMode::Create)
    }

    fn append(&self, directory: &str, document: &Document) -> WriteFileResult {
        self.write_document(directory, document, WriteMode::Append)
    }

    fn list(&self, directory: &str) -> Vec<FileInformation> {
        if names::is_blank(directory) || !self.storage.is_dir(Path::new(directory)) {
            return Vec::new();
        }

        match self.storage.list_files(Path::new(directory)) {
            Ok(entries) => entries
                .into_iter()
                .map(|entry| FileInformation::from_bytes(entry.name, entry.size))
                .collect(),
            Err(e) => {
                warn!("list failed: {:#}", e);
                Vec::new()
            }
        }
    }

    fn exists(&self, path: &str) -> bool {
        !names::is_blank(path) && self.path_exists(Path::new(path))
    }

    fn delete(&self, path: &str) {
        if names::is_blank(path) {
            return;
        }

        let target = Path::new(path);
        let result = if self.storage.is_dir(target) {
            self.storage.remove_dir_all(target)
        } else if self.storage.is_file(target) {
            self.storage.remove_file(target)
        } else {
            return;
        };

        match result {
            Ok(()) => debug!("deleted {}", target.display()),
            Err(e) => warn!("delete failed: {:#}", e),
        }
    }

    fn find_document(&self, path: &str) -> Option<Document> {
        if names::is_blank(path) || !self.storage.is_file(Path::new(path)) {
            return None;
        }

        let data = match self.storage.read_bytes(Path::new(path)) {
            Ok(data) => data,
            Err(e) => {
                warn!("read failed: {:#}", e);
                return None;
            }
        };

        match DocumentBuilder::new()
            .with_name_from_path(path)
            .with_bytes(Some(Bytes::from(data)))
            .build()
        {
            Ok(document) => Some(document),
            Err(e) => {
                warn!("failed to build document for {}: {}", path, e);
                None
            }
        }
    }

    fn read_all_lines(&self, path: &str) -> Result<Vec<String>, ReadLinesError> {
        if names::is_blank(path) {
            return Err(ReadLinesError::InvalidArgument);
        }
        if !self.storage.is_file(Path::new(path)) {
            return Err(ReadLinesError::NotFound(PathBuf::from(path)));
        }

        let data = self
            .storage
            .read_bytes(Path::new(path))
            .map_err(|e| ReadLinesError::Read {
                path: PathBuf::from(path),
                message: format!("{:#}", e),
            })?;

        Ok(split_lines(&String::from_utf8_lossy(&data)))
    }

    fn move_file(&self, source: &str, destination: &str) -> bool {
        if !self.is_movable(source, destination) {
            return false;
        }

        let to = Path::new(destination);
        if self.path_exists(to) {
            debug!("not moving {}: {} already exists", source, destination);
            return false;
        }

        self.rename_path(Path::new(source), to)
    }

    fn move_with_overwrite(&self, source: &str, destination: &str) -> bool {
        if !self.is_movable(source, destination) {
            return false;
        }

        let to = Path::new(destination);
        if self.storage.is_dir(to) {
            debug!("not moving {}: {} is a directory", source, destination);
            return false;
        }
        if self.storage.is_file(to) {
            if let Err(e) = self.storage.remove_file(to) {
                warn!("could not replace destination: {:#}", e);
                return false;
            }
        }

        self.rename_path(Path::new(source), to)
    }

    fn rename(&self, path: &str, new_name: &str) -> bool {
        if !self.is_movable(path, new_name) {
            return false;
        }
        if !names::is_valid_file_name(new_name) {
            debug!("not renaming {}: invalid name {:?}", path, new_name);
            return false;
        }

        let from = Path::new(path);
        let to = from.parent().unwrap_or(Path::new("")).join(new_name);
        if self.path_exists(&to) {
            debug!("not renaming {}: {} already exists", path, to.display());
            return false;
        }

        self.rename_path(from, &to)
    }
}

#[async_trait]
impl AsyncFileSystem for FileStore {
    async fn write_async(&self, directory: &str, document: &Document) -> WriteFileResult {
        let (directory, document) = (directory.to_string(), document.clone());
        self.blocking(move |store| store.write(&directory, &document), |cause| {
            WriteFileResult::failed(WriteError::WriteFailed { cause })
        })
        .await
    }

    async fn append_async(&self, directory: &str, document: &Document) -> WriteFileResult {
        let (directory, document) = (directory.to_string(), document.clone());
        self.blocking(move |store| store.append(&directory, &document), |cause| {
            WriteFileResult::failed(WriteError::WriteFailed { cause })
        })
        .await
    }

    async fn list_async(&self, directory: &str) -> Vec<FileInformation> {
        let directory = directory.to_string();
        self.blocking(move |store| store.list(&directory), |_| Vec::new())
            .await
    }

    async fn exists_async(&self, path: &str) -> bool {
        let path = path.to_string();
        self.blocking(move |store| store.exists(&path), |_| false).await
    }

    async fn delete_async(&self, path: &str) {
        let path = path.to_string();
        self.blocking(move |store| store.delete(&path), |_| ()).await
    }

    async fn find_document_async(&self, path: &str) -> Option<Document> {
        let path = path.to_string();
        self.blocking(move |store| store.find_document(&path), |_| None)
            .await
    }

    async fn get_document_async(&self, path: &str) -> Document {
        let path = path.to_string();
        self.blocking(move |store| store.get_document(&path), |_| Document::null())
            .await
    }

    async fn read_async(&self, path: &str) -> Document {
        let path = path.to_string();
        self.blocking(move |store| store.read(&path), |_| Document::null())
            .await
    }

    async fn read_all_lines_async(&self, path: &str) -> Result<Vec<String>, ReadLinesError> {
        let path = path.to_string();
        let failed = PathBuf::from(&path);
        self.blocking(
            move |store| store.read_all_lines(&path),
            |message| Err(ReadLinesError::Read { path: failed, message }),
        )
        .await
    }

    async fn move_file_async(&self, source: &str, destination: &str) -> bool {
        let (source, destination) = (source.to_string(), destination.to_string());
        self.blocking(move |store| store.move_file(&source, &destination), |_| false)
            .await
    }

    async fn move_with_overwrite_async(&self, source: &str, destination: &str) -> bool {
        let (source, destination) = (source.to_string(), destination.to_string());
        self.blocking(
            move |store| store.move_with_overwrite(&source, &destination),
            |_| false,
        )
        .await
    }

    async fn rename_async(&self, path: &str, new_name: &str) -> bool {
        let (path, new_name) = (path.to_string(), new_name.to_string());
        self.blocking(move |store| store.rename(&path, &new_name), |_| false)
            .await
    }
}
