use crate::domain::ports::Storage;
use crate::utils::error::{PlatformError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PlatformError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => PlatformError::IoError(e),
        })
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, data)?;
        Ok(())
    }
}

/// In-process storage. Clones share the same files.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Rc<RefCell<HashMap<PathBuf, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    pub fn insert_file(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.files.borrow_mut().insert(path.into(), data.into());
    }
}

impl Storage for MemoryStorage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.get_file(path).ok_or_else(|| PlatformError::FileNotFound {
            path: path.display().to_string(),
        })
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        self.insert_file(path, data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_storage_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/platform_data.json");

        let storage = LocalStorage::new();
        storage.write_file(&path, b"[]").unwrap();
        assert_eq!(storage.read_file(&path).unwrap(), b"[]");
    }

    #[test]
    fn test_local_storage_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let err = LocalStorage::new().read_file(&path).unwrap_err();
        assert!(matches!(err, PlatformError::FileNotFound { .. }));
    }

    #[test]
    fn test_memory_storage_clones_share_files() {
        let storage = MemoryStorage::new();
        let view = storage.clone();

        storage.write_file(Path::new("a.json"), b"[]").unwrap();
        assert_eq!(view.get_file("a.json"), Some(b"[]".to_vec()));
        assert!(matches!(
            view.read_file(Path::new("b.json")),
            Err(PlatformError::FileNotFound { .. })
        ));
    }
}
