//! Inbound and outbound transport event type definitions.

use serde::{Deserialize, Serialize};

use shophub_entity::chat::{AgentRef, ChatMessage, ChatStatus};
use shophub_entity::notification::NotificationInput;

/// Events pushed by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A notification to add to the hub. The payload matches the hub's
    /// creation contract; id, timestamp, and read state are assigned
    /// locally.
    Notification {
        /// Notification fields.
        #[serde(flatten)]
        notification: NotificationInput,
    },
    /// A message in a chat room.
    ChatMessage {
        /// Target chat identifier.
        chat_id: String,
        /// Session token of the originating client, when echoed from a
        /// customer session. Used for self-echo deduplication.
        #[serde(default)]
        session_token: Option<String>,
        /// The message.
        message: ChatMessage,
    },
    /// Someone is typing in a chat room.
    Typing {
        /// Target chat identifier.
        chat_id: String,
        /// Session token of the typing party.
        session_token: String,
    },
    /// The chat was assigned to an agent.
    Assignment {
        /// Target chat identifier.
        chat_id: String,
        /// The handling agent, if any.
        #[serde(default)]
        assigned_to: Option<AgentRef>,
    },
    /// The chat status changed.
    StatusChanged {
        /// Target chat identifier.
        chat_id: String,
        /// The new status.
        status: ChatStatus,
    },
}

/// Commands sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Join a chat room to receive its events.
    Join {
        /// Chat identifier.
        chat_id: String,
    },
    /// Relay an accepted outbound message to other room participants.
    SendMessage {
        /// Chat identifier.
        chat_id: String,
        /// Session token of the sending client, so its own controller can
        /// drop the echoed event.
        session_token: String,
        /// The message.
        message: ChatMessage,
    },
}
