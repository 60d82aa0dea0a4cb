//! Chat session control.

pub mod controller;
pub mod typing;

pub use controller::{ChatSessionController, StartChatForm};
pub use typing::TypingIndicator;
