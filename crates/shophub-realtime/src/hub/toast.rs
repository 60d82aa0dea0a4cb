//! Ephemeral toast presentation.
//!
//! The mapping here is purely cosmetic: emitting a toast never touches
//! the canonical notification list.

use std::time::Duration;

use tracing::info;

use shophub_core::config::notifications::NotificationsConfig;
use shophub_entity::notification::{Notification, NotificationKind, NotificationPriority};

/// Fallback on-screen duration for ad-hoc toasts.
const DEFAULT_DURATION: Duration = Duration::from_secs(5);

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    /// Neutral presentation.
    Neutral,
    /// Informational (blue).
    Info,
    /// Success (green).
    Success,
    /// Warning (amber).
    Warning,
    /// Error (red).
    Error,
    /// Alert — urgent attention.
    Alert,
}

/// Icon shown alongside the toast body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastIcon {
    /// Document icon, used for approval requests.
    Document,
    /// Warning triangle.
    Warning,
}

/// One ephemeral on-screen notice.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Visual style.
    pub style: ToastStyle,
    /// Title line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Optional icon.
    pub icon: Option<ToastIcon>,
    /// On-screen duration.
    pub duration: Duration,
}

impl Toast {
    /// Build an informational toast with the default duration.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Info,
            title: title.into(),
            message: message.into(),
            icon: None,
            duration: DEFAULT_DURATION,
        }
    }

    /// Build an error toast with the default duration.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Error,
            title: title.into(),
            message: message.into(),
            icon: None,
            duration: DEFAULT_DURATION,
        }
    }
}

/// Build the toast for a freshly added notification.
///
/// Urgent notices stay on screen longer than every other kind.
pub fn toast_for(notification: &Notification, config: &NotificationsConfig) -> Toast {
    let (style, icon) = match notification.kind {
        NotificationKind::Success => (ToastStyle::Success, None),
        NotificationKind::Error => (ToastStyle::Error, None),
        NotificationKind::Warning => (ToastStyle::Warning, Some(ToastIcon::Warning)),
        NotificationKind::Approval => (ToastStyle::Info, Some(ToastIcon::Document)),
        NotificationKind::Urgent => (ToastStyle::Alert, None),
        NotificationKind::Info => (ToastStyle::Neutral, None),
    };

    let duration = if notification.kind == NotificationKind::Urgent
        || notification.priority == NotificationPriority::Urgent
    {
        Duration::from_secs(config.urgent_toast_duration_seconds)
    } else {
        Duration::from_secs(config.toast_duration_seconds)
    };

    Toast {
        style,
        title: notification.title.clone(),
        message: notification.message.clone(),
        icon,
        duration,
    }
}

/// Receives toasts for presentation. The hub has no knowledge of how the
/// UI renders them.
pub trait ToastSink: Send + Sync {
    /// Present a toast.
    fn show(&self, toast: Toast);
}

/// Default sink: logs the toast through `tracing`.
#[derive(Debug, Default)]
pub struct TracingToastSink;

impl ToastSink for TracingToastSink {
    fn show(&self, toast: Toast) {
        info!(
            style = ?toast.style,
            title = %toast.title,
            duration_ms = toast.duration.as_millis() as u64,
            "Toast"
        );
    }
}
