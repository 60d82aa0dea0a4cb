//! Chat domain entities.

pub mod message;
pub mod model;
pub mod status;

pub use message::{ChatMessage, MessageKind, Sender};
pub use model::{AgentRef, Chat, Customer};
pub use status::ChatStatus;
