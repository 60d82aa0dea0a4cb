//! Notification category enumeration.

use serde::{Deserialize, Serialize};

/// Category of a notification, used for filtered views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    /// Repair approval workflow notifications.
    Approval,
    /// Follow-up task notifications.
    Followup,
    /// System-level notifications.
    System,
    /// Appointment and service reminders.
    Reminder,
}

impl NotificationCategory {
    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approval => "approval",
            Self::Followup => "followup",
            Self::System => "system",
            Self::Reminder => "reminder",
        }
    }
}

impl Default for NotificationCategory {
    fn default() -> Self {
        Self::System
    }
}

impl std::fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
