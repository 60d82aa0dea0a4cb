//! In-memory storage backend for tests and ephemeral runs.

use std::sync::Mutex;

use shophub_core::AppResult;

use crate::backend::StoreBackend;

/// Holds the document in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    /// The stored document.
    value: Mutex<Option<String>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreBackend for MemoryBackend {
    fn read(&self) -> AppResult<Option<String>> {
        let value = self.value.lock().unwrap_or_else(|e| e.into_inner());
        Ok(value.clone())
    }

    fn write(&self, value: &str) -> AppResult<()> {
        let mut slot = self.value.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(value.to_string());
        Ok(())
    }
}
