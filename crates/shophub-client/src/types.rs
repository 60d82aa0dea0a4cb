//! Request payloads for the portal API.

use serde::{Deserialize, Serialize};

use shophub_entity::chat::{Customer, MessageKind};

/// Payload for creating a new chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChatRequest {
    /// The customer opening the chat.
    pub customer: Customer,
    /// Subject line.
    pub subject: String,
    /// Category label.
    pub category: String,
    /// Opening system-style message.
    pub initial_message: String,
}

/// Payload for posting a message into an existing chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMessageRequest {
    /// Message body.
    pub content: String,
    /// Payload kind.
    pub kind: MessageKind,
}
