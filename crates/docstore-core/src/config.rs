use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which [`Storage`](docstore_platform::Storage) a store is built on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The host file system
    #[default]
    Host,
    /// A private in-memory tree, discarded when the store is dropped
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: Backend,
}

impl StoreConfig {
    /// Default config file path for this platform
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "docstore", "docstore") {
            dirs.config_dir().join("config.json")
        } else {
            PathBuf::from("docstore-config.json")
        }
    }

    /// Load config from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config: Self =
            serde_json::from_str(&data).with_context(|| "failed to parse config JSON")?;
        Ok(config)
    }

    /// Save config to a file path
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_backend_is_host() {
        assert_eq!(StoreConfig::default().backend, Backend::Host);
    }

    #[test]
    fn test_missing_backend_field_uses_default() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.backend, Backend::Host);
    }

    #[test]
    fn test_backend_names_are_lowercase() {
        let config: StoreConfig = serde_json::from_str(r#"{"backend":"memory"}"#).unwrap();
        assert_eq!(config.backend, Backend::Memory);
        assert!(serde_json::from_str::<StoreConfig>(r#"{"backend":"Memory"}"#).is_err());
    }

    #[test]
    fn test_save_creates_parent_and_loads_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.json");
        let config = StoreConfig {
            backend: Backend::Memory,
        };

        config.save(&path).unwrap();
        let loaded = StoreConfig::load(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.json");

        let err = StoreConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.json"));
    }

    #[test]
    fn test_default_path_is_json() {
        assert_eq!(
            StoreConfig::default_path().extension().and_then(|e| e.to_str()),
            Some("json")
        );
    }
}
