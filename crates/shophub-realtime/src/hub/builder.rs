//! Preset notification builders for domain workflows.

use shophub_entity::notification::{
    NotificationCategory, NotificationInput, NotificationKind, NotificationPriority,
};

/// Build an approval-request notification.
///
/// Priority escalates to urgent when the estimated repair cost exceeds
/// the configured threshold, otherwise high.
pub fn approval_request(
    title: impl Into<String>,
    message: impl Into<String>,
    estimated_cost: f64,
    cost_threshold: f64,
    action_url: Option<String>,
) -> NotificationInput {
    let priority = if estimated_cost > cost_threshold {
        NotificationPriority::Urgent
    } else {
        NotificationPriority::High
    };

    NotificationInput {
        kind: NotificationKind::Approval,
        title: title.into(),
        message: message.into(),
        action_url,
        priority,
        category: NotificationCategory::Approval,
    }
}

/// Build a follow-up-task-assigned notification.
pub fn follow_up_assigned(
    title: impl Into<String>,
    message: impl Into<String>,
    action_url: Option<String>,
) -> NotificationInput {
    NotificationInput {
        kind: NotificationKind::Info,
        title: title.into(),
        message: message.into(),
        action_url,
        priority: NotificationPriority::Medium,
        category: NotificationCategory::Followup,
    }
}

/// Build an urgent-reminder notification.
pub fn urgent_reminder(
    title: impl Into<String>,
    message: impl Into<String>,
    action_url: Option<String>,
) -> NotificationInput {
    NotificationInput {
        kind: NotificationKind::Urgent,
        title: title.into(),
        message: message.into(),
        action_url,
        priority: NotificationPriority::Urgent,
        category: NotificationCategory::Reminder,
    }
}
