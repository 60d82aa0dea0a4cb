//! File-backed storage backend.

use std::path::{Path, PathBuf};

use shophub_core::{AppError, AppResult};

use crate::backend::StoreBackend;

/// Stores the document as a single file on disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
    /// Path of the document.
    path: PathBuf,
}

impl FileBackend {
    /// Create a file backend for the given path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl StoreBackend for FileBackend {
    fn read(&self) -> AppResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| AppError::storage(format!("Failed to read '{}': {e}", self.path.display())))?;
        Ok(Some(contents))
    }

    fn write(&self, value: &str) -> AppResult<()> {
        // Ensure the parent directory exists before the first write.
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::storage(format!("Failed to create '{}': {e}", parent.display()))
                })?;
            }
        }
        std::fs::write(&self.path, value)
            .map_err(|e| AppError::storage(format!("Failed to write '{}': {e}", self.path.display())))?;
        Ok(())
    }
}
