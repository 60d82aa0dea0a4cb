//! # shophub-realtime
//!
//! Realtime engine for the ShopHub CRM client. Provides:
//!
//! - The notification hub: canonical in-memory notification list with
//!   durable local persistence and synchronous subscriber fan-out
//! - A WebSocket transport with an explicit connection state machine and
//!   fixed-delay, unbounded reconnection
//! - Typed transport events with a single parse chokepoint
//! - A chat session controller: join/leave, message echo dedup, typing
//!   indicator, assignment and status reconciliation

pub mod chat;
pub mod event;
pub mod hub;
pub mod transport;

pub use chat::controller::ChatSessionController;
pub use hub::service::NotificationHub;
pub use transport::connection::Transport;
pub use transport::state::ConnectionState;
