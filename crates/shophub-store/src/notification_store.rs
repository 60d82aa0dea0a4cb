//! Best-effort persistence of the full notification list.

use tracing::warn;

use shophub_entity::notification::Notification;

use crate::backend::StoreBackend;

/// Serializes the canonical notification list to durable storage after
/// every mutation and reconstructs it once at hub construction.
pub struct NotificationStore {
    /// The storage backend holding the single document.
    backend: Box<dyn StoreBackend>,
}

impl NotificationStore {
    /// Create a store over the given backend.
    pub fn new(backend: Box<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Persist the full list, overwriting any prior document.
    ///
    /// Failures (quota, serialization, I/O) are logged and swallowed: they
    /// must never propagate to the caller or block the in-memory mutation
    /// that triggered the save.
    pub fn save(&self, list: &[Notification]) {
        let serialized = match serde_json::to_string(list) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "Failed to serialize notification list");
                return;
            }
        };
        if let Err(e) = self.backend.write(&serialized) {
            warn!(error = %e, "Failed to persist notification list");
        }
    }

    /// Load the persisted list.
    ///
    /// An absent or unreadable document yields an empty list rather than
    /// an error.
    pub fn load(&self) -> Vec<Notification> {
        let raw = match self.backend.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read notification list");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "Discarding corrupt notification list");
                Vec::new()
            }
        }
    }
}
