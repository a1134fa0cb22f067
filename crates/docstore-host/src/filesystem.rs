use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use docstore_platform::storage::{Storage, StorageEntry, WriteMode};

/// [`Storage`] over the real file system. Relative paths resolve against the
/// process working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostStorage;

impl HostStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for HostStorage {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory {}", path.display()))
    }

    fn write_bytes(&self, path: &Path, data: &[u8], mode: WriteMode) -> Result<()> {
        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Create => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };

        let mut file = options
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        file.write_all(data)
            .with_context(|| format!("failed to write {}", path.display()))?;
        file.flush()
            .with_context(|| format!("failed to flush {}", path.display()))
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("failed to read file {}", path.display()))
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<StorageEntry>> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("failed to read directory {}", dir.display()))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("skipping dir entry: {}", e);
                    continue;
                }
            };

            let meta = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!("skipping {}: {}", entry.path().display(), e);
                    continue;
                }
            };

            if !meta.is_file() {
                continue;
            }

            result.push(StorageEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                size: meta.len(),
            });
        }

        result.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        Ok(result)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("failed to delete file {}", path.display()))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to delete directory {}", path.display()))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to)
            .with_context(|| format!("failed to move {} to {}", from.display(), to.display()))
    }
}
