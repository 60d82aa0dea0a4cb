//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::NotificationCategory;
use super::kind::NotificationKind;
use super::priority::NotificationPriority;

/// A notification held in the canonical list and persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Opaque unique identifier, generated locally at creation time.
    pub id: String,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Short human-readable title.
    pub title: String,
    /// Human-readable body text.
    pub message: String,
    /// Creation instant. Set once, immutable.
    pub timestamp: DateTime<Utc>,
    /// Whether the user has read this notification. Transitions to true
    /// only via explicit mark-as-read; never reverts.
    pub read: bool,
    /// Optional deep-link URL.
    pub action_url: Option<String>,
    /// Priority level.
    pub priority: NotificationPriority,
    /// Category for filtered views.
    pub category: NotificationCategory,
}

impl Notification {
    /// Build a full notification from its input fields.
    ///
    /// Stamps the creation instant, marks the record unread, and assigns a
    /// locally generated id (UUID v7: time-ordered with a random suffix).
    pub fn from_input(input: NotificationInput) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            kind: input.kind,
            title: input.title,
            message: input.message,
            timestamp: Utc::now(),
            read: false,
            action_url: input.action_url,
            priority: input.priority,
            category: input.category,
        }
    }

    /// Check whether the notification is unread.
    pub fn is_unread(&self) -> bool {
        !self.read
    }
}

/// The creation contract for a notification: every field except the ones
/// the hub assigns (`id`, `timestamp`, `read`).
///
/// This shape doubles as the wire payload for server-pushed notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationInput {
    /// Notification kind.
    pub kind: NotificationKind,
    /// Short human-readable title.
    pub title: String,
    /// Human-readable body text.
    pub message: String,
    /// Optional deep-link URL.
    #[serde(default)]
    pub action_url: Option<String>,
    /// Priority level. Defaults to medium when absent from a frame.
    #[serde(default)]
    pub priority: NotificationPriority,
    /// Category. Defaults to system when absent from a frame.
    #[serde(default)]
    pub category: NotificationCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_stamps_fields() {
        let input = NotificationInput {
            kind: NotificationKind::Info,
            title: "Vehicle ready".into(),
            message: "Your 2019 Corolla is ready for pickup".into(),
            action_url: None,
            priority: NotificationPriority::Medium,
            category: NotificationCategory::System,
        };

        let n = Notification::from_input(input);
        assert!(!n.read);
        assert!(!n.id.is_empty());
        assert!(n.is_unread());
    }

    #[test]
    fn test_input_defaults_from_sparse_frame() {
        let input: NotificationInput = serde_json::from_str(
            r#"{"kind": "warning", "title": "T", "message": "M"}"#,
        )
        .unwrap();
        assert_eq!(input.priority, NotificationPriority::Medium);
        assert_eq!(input.category, NotificationCategory::System);
        assert_eq!(input.action_url, None);
    }

    #[test]
    fn test_ids_are_unique() {
        let input = NotificationInput {
            kind: NotificationKind::Info,
            title: "T".into(),
            message: "M".into(),
            action_url: None,
            priority: NotificationPriority::Low,
            category: NotificationCategory::System,
        };
        let a = Notification::from_input(input.clone());
        let b = Notification::from_input(input);
        assert_ne!(a.id, b.id);
    }
}
