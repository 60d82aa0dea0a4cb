//! Transport → hub bridge.
//!
//! Routes server-pushed notification events into the hub. Chat-scoped
//! events are left to the chat session controllers listening on the same
//! broadcast stream.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::event::ServerEvent;

use super::service::NotificationHub;

/// Spawn the bridge task feeding the hub from the transport's event
/// stream.
///
/// Inbound notifications are applied in receipt order, with no
/// deduplication: a duplicate server push produces a duplicate entry.
pub fn spawn_notification_bridge(
    hub: Arc<NotificationHub>,
    mut events: broadcast::Receiver<ServerEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ServerEvent::Notification { notification }) => {
                    hub.add_notification(notification);
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Notification bridge fell behind the event stream");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        debug!("Notification bridge ended");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shophub_core::config::notifications::NotificationsConfig;
    use shophub_entity::notification::{
        NotificationCategory, NotificationInput, NotificationKind, NotificationPriority,
    };
    use shophub_store::{MemoryBackend, NotificationStore};

    use crate::hub::toast::TracingToastSink;

    fn make_hub() -> Arc<NotificationHub> {
        Arc::new(NotificationHub::new(
            NotificationStore::new(Box::new(MemoryBackend::new())),
            Arc::new(TracingToastSink),
            NotificationsConfig::default(),
        ))
    }

    fn push(title: &str) -> ServerEvent {
        ServerEvent::Notification {
            notification: NotificationInput {
                kind: NotificationKind::Info,
                title: title.into(),
                message: "M".into(),
                action_url: None,
                priority: NotificationPriority::Medium,
                category: NotificationCategory::System,
            },
        }
    }

    #[tokio::test]
    async fn test_bridge_applies_pushes_in_receipt_order() {
        let hub = make_hub();
        let (tx, rx) = broadcast::channel(16);
        let handle = spawn_notification_bridge(Arc::clone(&hub), rx);

        tx.send(push("first")).unwrap();
        tx.send(push("second")).unwrap();
        drop(tx);
        handle.await.unwrap();

        let titles: Vec<String> = hub.notifications().iter().map(|n| n.title.clone()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_duplicate_pushes_produce_duplicate_entries() {
        let hub = make_hub();
        let (tx, rx) = broadcast::channel(16);
        let handle = spawn_notification_bridge(Arc::clone(&hub), rx);

        tx.send(push("same")).unwrap();
        tx.send(push("same")).unwrap();
        drop(tx);
        handle.await.unwrap();

        let list = hub.notifications();
        assert_eq!(list.len(), 2);
        // Entries are distinct records despite identical payloads.
        assert_ne!(list[0].id, list[1].id);
    }
}
