use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::{bail, Result};
use docstore_platform::storage::{Storage, StorageEntry, WriteMode};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
}

/// [`Storage`] held entirely in memory.
///
/// Every path is resolved against a virtual root `/`, so `a/b` and `/a/b`
/// name the same entry. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    nodes: Arc<RwLock<HashMap<PathBuf, Node>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize_path(path: &Path) -> PathBuf {
        let mut result = PathBuf::from("/");

        for component in path.components() {
            match component {
                Component::RootDir => result = PathBuf::from("/"),
                Component::Normal(name) => result.push(name),
                Component::ParentDir => {
                    result.pop();
                }
                Component::CurDir | Component::Prefix(_) => {}
            }
        }

        result
    }

    fn is_root(path: &Path) -> bool {
        path.parent().is_none()
    }

    fn dir_exists(nodes: &HashMap<PathBuf, Node>, path: &Path) -> bool {
        Self::is_root(path) || matches!(nodes.get(path), Some(Node::Dir))
    }

    fn parent_exists(nodes: &HashMap<PathBuf, Node>, path: &Path) -> bool {
        path.parent().map_or(false, |parent| Self::dir_exists(nodes, parent))
    }
}

impl Storage for MemoryStorage {
    fn is_file(&self, path: &Path) -> bool {
        let path = Self::normalize_path(path);
        let nodes = self.nodes.read().unwrap_or_else(PoisonError::into_inner);
        matches!(nodes.get(&path), Some(Node::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = Self::normalize_path(path);
        let nodes = self.nodes.read().unwrap_or_else(PoisonError::into_inner);
        Self::dir_exists(&nodes, &path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let path = Self::normalize_path(path);
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);

        let mut ancestors: Vec<&Path> = path.ancestors().collect();
        ancestors.reverse();
        for dir in ancestors.into_iter().filter(|p| !Self::is_root(p)) {
            match nodes.get(dir) {
                Some(Node::File(_)) => bail!("{} exists and is not a directory", dir.display()),
                Some(Node::Dir) => {}
                None => {
                    nodes.insert(dir.to_path_buf(), Node::Dir);
                }
            }
        }

        Ok(())
    }

    fn write_bytes(&self, path: &Path, data: &[u8], mode: WriteMode) -> Result<()> {
        let path = Self::normalize_path(path);
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);

        if !Self::parent_exists(&nodes, &path) {
            bail!("parent directory of {} does not exist", path.display());
        }

        match nodes.get_mut(&path) {
            Some(Node::Dir) => bail!("{} is a directory", path.display()),
            Some(Node::File(content)) if mode == WriteMode::Append => {
                content.extend_from_slice(data);
                return Ok(());
            }
            _ => {}
        }

        nodes.insert(path, Node::File(data.to_vec()));
        Ok(())
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let path = Self::normalize_path(path);
        let nodes = self.nodes.read().unwrap_or_else(PoisonError::into_inner);

        match nodes.get(&path) {
            Some(Node::File(content)) => Ok(content.clone()),
            Some(Node::Dir) => bail!("{} is a directory", path.display()),
            None => bail!("file not found: {}", path.display()),
        }
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<StorageEntry>> {
        let dir = Self::normalize_path(dir);
        let nodes = self.nodes.read().unwrap_or_else(PoisonError::into_inner);

        if !Self::dir_exists(&nodes, &dir) {
            bail!("failed to read directory {}", dir.display());
        }

        let mut result: Vec<StorageEntry> = nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir.as_path()))
            .filter_map(|(path, node)| match node {
                Node::File(content) => Some(StorageEntry {
                    name: path.file_name()?.to_string_lossy().to_string(),
                    size: content.len() as u64,
                }),
                Node::Dir => None,
            })
            .collect();

        result.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        Ok(result)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let path = Self::normalize_path(path);
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);

        match nodes.get(&path) {
            Some(Node::File(_)) => {
                nodes.remove(&path);
                Ok(())
            }
            Some(Node::Dir) => bail!("{} is a directory", path.display()),
            None => bail!("file not found: {}", path.display()),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let path = Self::normalize_path(path);
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);

        if Self::is_root(&path) {
            bail!("refusing to delete the root directory");
        }
        if !matches!(nodes.get(&path), Some(Node::Dir)) {
            bail!("directory not found: {}", path.display());
        }

        let before = nodes.len();
        nodes.retain(|key, _| !key.starts_with(&path));
        tracing::debug!(
            "memory storage: removed {} entries under {}",
            before - nodes.len(),
            path.display()
        );
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let from = Self::normalize_path(from);
        let to = Self::normalize_path(to);
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);

        if !Self::parent_exists(&nodes, &to) {
            bail!("parent directory of {} does not exist", to.display());
        }

        match (nodes.get(&from), nodes.get(&to)) {
            (None, _) => bail!("file not found: {}", from.display()),
            (Some(Node::File(_)), Some(Node::Dir)) => bail!("{} is a directory", to.display()),
            (Some(Node::Dir), Some(_)) => bail!("{} already exists", to.display()),
            (Some(Node::Dir), None) if to.starts_with(&from) => {
                bail!("cannot move {} into itself", from.display())
            }
            _ => {}
        }

        if from == to {
            return Ok(());
        }

        let moved: Vec<PathBuf> = nodes
            .keys()
            .filter(|key| key.starts_with(&from))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = nodes.remove(&old) {
                let new = match old.strip_prefix(&from) {
                    Ok(rest) if !rest.as_os_str().is_empty() => to.join(rest),
                    _ => to.clone(),
                };
                nodes.insert(new, node);
            }
        }

        Ok(())
    }
}
