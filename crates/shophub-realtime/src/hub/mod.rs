//! Notification hub: canonical list ownership, persistence, fan-out.

pub mod bridge;
pub mod builder;
pub mod service;
pub mod subscribers;
pub mod toast;

pub use service::NotificationHub;
pub use subscribers::SubscriberId;
pub use toast::{Toast, ToastSink, ToastStyle, TracingToastSink};
