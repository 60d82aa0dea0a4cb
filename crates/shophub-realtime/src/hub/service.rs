//! The notification hub — single source of truth for the notification
//! list within a client session.
//!
//! All mutations are synchronous and applied in call order: the list is
//! updated, the full list is persisted, and subscribers are fanned out
//! to before control returns to the caller. Persistence is best-effort
//! and never rolls back an applied mutation.

use std::sync::{Arc, Mutex};

use shophub_core::config::notifications::NotificationsConfig;
use shophub_entity::notification::{
    Notification, NotificationCategory, NotificationInput, NotificationPriority,
};
use shophub_store::NotificationStore;

use super::builder;
use super::subscribers::{SubscriberId, SubscriberRegistry};
use super::toast::{toast_for, ToastSink};

/// Owns the canonical notification list: mediates all reads and
/// mutations, persists after every change, and fans out snapshots to
/// subscribers.
pub struct NotificationHub {
    /// The canonical list, newest first. No other component holds a
    /// writable reference.
    notifications: Mutex<Vec<Notification>>,
    /// Registered fan-out callbacks.
    subscribers: SubscriberRegistry,
    /// Durable persistence.
    store: NotificationStore,
    /// Toast presentation sink.
    toasts: Arc<dyn ToastSink>,
    /// Hub settings.
    config: NotificationsConfig,
}

impl NotificationHub {
    /// Create a hub, loading any persisted list from the store.
    pub fn new(
        store: NotificationStore,
        toasts: Arc<dyn ToastSink>,
        config: NotificationsConfig,
    ) -> Self {
        let notifications = store.load();
        Self {
            notifications: Mutex::new(notifications),
            subscribers: SubscriberRegistry::new(),
            store,
            toasts,
            config,
        }
    }

    /// Add a notification built from the given input.
    ///
    /// Assigns the id, creation instant, and unread state; inserts at the
    /// head of the list; emits a toast; persists; fans out. Always
    /// succeeds (persistence is best-effort).
    pub fn add_notification(&self, input: NotificationInput) -> Notification {
        let notification = Notification::from_input(input);

        let snapshot = {
            let mut list = self.lock_list();
            list.insert(0, notification.clone());
            list.clone()
        };

        self.toasts.show(toast_for(&notification, &self.config));
        self.persist_and_notify(&snapshot);

        notification
    }

    /// Add an approval-request notification. Priority escalates to urgent
    /// when the estimated cost exceeds the configured threshold.
    pub fn notify_approval_request(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        estimated_cost: f64,
        action_url: Option<String>,
    ) -> Notification {
        self.add_notification(builder::approval_request(
            title,
            message,
            estimated_cost,
            self.config.approval_cost_threshold,
            action_url,
        ))
    }

    /// Add a follow-up-task-assigned notification.
    pub fn notify_follow_up_assigned(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        action_url: Option<String>,
    ) -> Notification {
        self.add_notification(builder::follow_up_assigned(title, message, action_url))
    }

    /// Add an urgent-reminder notification.
    pub fn notify_urgent_reminder(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        action_url: Option<String>,
    ) -> Notification {
        self.add_notification(builder::urgent_reminder(title, message, action_url))
    }

    /// The current full list, newest first. Snapshot semantics: the
    /// returned vector is the caller's to keep.
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock_list().clone()
    }

    /// Unread notifications, order preserved.
    pub fn unread(&self) -> Vec<Notification> {
        self.lock_list()
            .iter()
            .filter(|n| !n.read)
            .cloned()
            .collect()
    }

    /// Notifications in the given category, order preserved.
    pub fn by_category(&self, category: NotificationCategory) -> Vec<Notification> {
        self.lock_list()
            .iter()
            .filter(|n| n.category == category)
            .cloned()
            .collect()
    }

    /// Unread notifications at urgent priority.
    pub fn urgent(&self) -> Vec<Notification> {
        self.lock_list()
            .iter()
            .filter(|n| n.priority == NotificationPriority::Urgent && !n.read)
            .cloned()
            .collect()
    }

    /// Number of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.lock_list().iter().filter(|n| !n.read).count()
    }

    /// Number of unread notifications at urgent priority.
    pub fn urgent_count(&self) -> usize {
        self.lock_list()
            .iter()
            .filter(|n| n.priority == NotificationPriority::Urgent && !n.read)
            .count()
    }

    /// Mark one notification as read. Unknown ids are a no-op, not an
    /// error. Idempotent.
    pub fn mark_read(&self, id: &str) {
        let snapshot = {
            let mut list = self.lock_list();
            match list.iter_mut().find(|n| n.id == id) {
                Some(n) => {
                    n.read = true;
                    list.clone()
                }
                None => return,
            }
        };

        self.persist_and_notify(&snapshot);
    }

    /// Mark every notification as read. Persists once, fans out once.
    pub fn mark_all_read(&self) {
        let snapshot = {
            let mut list = self.lock_list();
            for n in list.iter_mut() {
                n.read = true;
            }
            list.clone()
        };

        self.persist_and_notify(&snapshot);
    }

    /// Remove one notification. Unknown ids are a no-op.
    pub fn delete(&self, id: &str) {
        let snapshot = {
            let mut list = self.lock_list();
            list.retain(|n| n.id != id);
            list.clone()
        };

        self.persist_and_notify(&snapshot);
    }

    /// Empty the list.
    pub fn clear_all(&self) {
        let snapshot = {
            let mut list = self.lock_list();
            list.clear();
            list.clone()
        };

        self.persist_and_notify(&snapshot);
    }

    /// Register a callback invoked with a fresh snapshot on every
    /// fan-out. Returns the handle for `unsubscribe`.
    pub fn subscribe(
        &self,
        callback: impl Fn(&[Notification]) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.subscribers.add(callback)
    }

    /// Remove a previously registered callback.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.subscribers.remove(id)
    }

    fn persist_and_notify(&self, snapshot: &[Notification]) {
        self.store.save(snapshot);
        self.subscribers.notify(snapshot);
    }

    fn lock_list(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.notifications.lock().unwrap_or_else(|e| e.into_inner())
    }
}
