//! Chat session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::ChatMessage;
use super::status::ChatStatus;

/// The customer party of a chat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Display name.
    pub name: String,
    /// Optional email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Client-generated correlation token, unique per session. Used to
    /// deduplicate self-originated transport events.
    pub session_token: String,
}

/// Reference to the shop agent handling a chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRef {
    /// Agent identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// One support conversation between a customer and the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    /// Server-assigned chat identifier.
    pub id: String,
    /// The customer who opened the chat.
    pub customer: Customer,
    /// The agent handling the chat, once assigned.
    #[serde(default)]
    pub assigned_to: Option<AgentRef>,
    /// Current status.
    pub status: ChatStatus,
    /// Descriptive priority label. Not used for control flow.
    #[serde(default)]
    pub priority: Option<String>,
    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,
    /// Category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Messages, append-only, oldest first.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Updated on every accepted inbound or outbound message.
    pub last_activity: DateTime<Utc>,
}

impl Chat {
    /// Append a message and bump the activity timestamp.
    pub fn push_message(&mut self, message: ChatMessage) {
        self.last_activity = Utc::now();
        self.messages.push(message);
    }
}
