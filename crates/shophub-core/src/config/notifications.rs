//! Notification hub configuration.

use serde::{Deserialize, Serialize};

/// Notification hub settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Estimated repair cost above which an approval request is raised at
    /// urgent priority instead of high.
    #[serde(default = "default_approval_cost_threshold")]
    pub approval_cost_threshold: f64,
    /// On-screen toast duration in seconds for standard notifications.
    #[serde(default = "default_toast_duration")]
    pub toast_duration_seconds: u64,
    /// On-screen toast duration in seconds for urgent notifications.
    #[serde(default = "default_urgent_toast_duration")]
    pub urgent_toast_duration_seconds: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            approval_cost_threshold: default_approval_cost_threshold(),
            toast_duration_seconds: default_toast_duration(),
            urgent_toast_duration_seconds: default_urgent_toast_duration(),
        }
    }
}

fn default_approval_cost_threshold() -> f64 {
    500.0
}

fn default_toast_duration() -> u64 {
    5
}

fn default_urgent_toast_duration() -> u64 {
    10
}
