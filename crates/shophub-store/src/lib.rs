//! # shophub-store
//!
//! Durable local persistence for the ShopHub notification list: a
//! [`StoreBackend`] trait with file-backed and in-memory implementations,
//! and the [`NotificationStore`] that serializes the full list under a
//! single fixed document.
//!
//! Persistence is best-effort by design: a failed save is logged and
//! swallowed so it can never roll back or block an in-memory mutation
//! already applied by the hub.

pub mod backend;
pub mod file;
pub mod memory;
pub mod notification_store;

pub use backend::StoreBackend;
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use notification_store::NotificationStore;
