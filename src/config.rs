use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::AppError;
use crate::storage::{FileStorage, MemoryStorage, Storage};

const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File { dir: PathBuf },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
}

impl Config {
    /// Reads `TASKBOARD_STORAGE` (`memory` | `file`) and `TASKBOARD_DATA_DIR`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(
            std::env::var("TASKBOARD_STORAGE").ok(),
            std::env::var("TASKBOARD_DATA_DIR").ok(),
        )
    }

    fn from_vars(backend: Option<String>, data_dir: Option<String>) -> Result<Self, AppError> {
        let storage = match backend.unwrap_or_default().trim().to_lowercase().as_str() {
            "" | "memory" => StorageBackend::Memory,
            "file" => StorageBackend::File {
                dir: PathBuf::from(data_dir.unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())),
            },
            other => {
                return Err(AppError::configuration(format!(
                    "TASKBOARD_STORAGE must be \"memory\" or \"file\", got \"{other}\""
                )))
            }
        };

        Ok(Self { storage })
    }

    pub fn open_storage(&self) -> Result<Arc<dyn Storage>, AppError> {
        match &self.storage {
            StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
            StorageBackend::File { dir } => Ok(Arc::new(FileStorage::open(dir.clone())?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_memory() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn file_backend_uses_data_dir() {
        let config = Config::from_vars(Some("FILE".into()), Some("/tmp/tb".into())).unwrap();
        assert_eq!(
            config.storage,
            StorageBackend::File {
                dir: PathBuf::from("/tmp/tb")
            }
        );

        let config = Config::from_vars(Some("file".into()), None).unwrap();
        assert_eq!(
            config.storage,
            StorageBackend::File {
                dir: PathBuf::from(DEFAULT_DATA_DIR)
            }
        );
    }

    #[test]
    fn unknown_backend_is_a_configuration_error() {
        let err = Config::from_vars(Some("redis".into()), None).unwrap_err();
        assert_eq!(err.kind(), "configuration");
    }

    #[test]
    fn open_file_storage_creates_the_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let config = Config {
            storage: StorageBackend::File { dir: data.clone() },
        };
        config.open_storage().unwrap();
        assert!(data.is_dir());
    }
}
