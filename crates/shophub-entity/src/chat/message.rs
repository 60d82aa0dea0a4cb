//! Chat message entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The party that authored a chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sender {
    /// Display name.
    pub name: String,
    /// Optional email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// Payload kind of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Plain text.
    Text,
    /// Image attachment.
    Image,
    /// File attachment.
    File,
    /// System-generated message.
    System,
}

impl Default for MessageKind {
    fn default() -> Self {
        Self::Text
    }
}

/// A single message within a chat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Authoring party.
    pub sender: Sender,
    /// Message payload.
    pub content: String,
    /// Payload kind.
    #[serde(default)]
    pub kind: MessageKind,
    /// Whether the receiving party has read the message.
    #[serde(default)]
    pub is_read: bool,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a system message, used as the opening entry of a new chat.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            sender: Sender {
                name: "ShopHub".to_string(),
                email: None,
            },
            content: content.into(),
            kind: MessageKind::System,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
