//! Storage backend abstraction.

use shophub_core::AppResult;

/// A key-value-shaped durable storage slot holding one serialized document.
///
/// Implementations are synchronous: the hub persists inside its mutation
/// path, which must never suspend.
pub trait StoreBackend: Send + Sync {
    /// Read the stored document, if any.
    fn read(&self) -> AppResult<Option<String>>;

    /// Write the document, overwriting any prior value.
    fn write(&self, value: &str) -> AppResult<()>;
}
