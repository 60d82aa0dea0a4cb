//! Chat session controller.
//!
//! Drives one support conversation: creates the chat through the portal
//! API, joins its room on the transport, and keeps the local record in
//! sync with room-scoped events. Events addressed to other chats are
//! ignored, so several controllers can share one transport.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use shophub_client::{ChatApi, CreateChatRequest, PostMessageRequest};
use shophub_core::config::chat::ChatConfig;
use shophub_core::{AppError, AppResult};
use shophub_entity::chat::{Chat, ChatMessage, Customer, MessageKind};

use crate::event::{ClientCommand, ServerEvent};
use crate::hub::toast::{Toast, ToastSink};

use super::typing::TypingIndicator;

/// The start-chat form a customer submits.
#[derive(Debug, Clone)]
pub struct StartChatForm {
    /// Customer name. Required.
    pub name: String,
    /// Customer email.
    pub email: Option<String>,
    /// Customer phone number.
    pub phone: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Category label.
    pub category: String,
    /// Opening message shown in the conversation.
    pub initial_message: String,
}

/// Controller for one active chat conversation.
pub struct ChatSessionController {
    /// The local chat record.
    chat: Arc<Mutex<Chat>>,
    /// Chat identifier, cached for event filtering.
    chat_id: String,
    /// This session's correlation token.
    session_token: String,
    /// Portal API collaborator.
    api: Arc<dyn ChatApi>,
    /// Outbound command queue of the shared transport.
    commands: mpsc::Sender<ClientCommand>,
    /// Typing indicator.
    typing: TypingIndicator,
    /// Room event consumer.
    events_task: JoinHandle<()>,
}

impl std::fmt::Debug for ChatSessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSessionController")
            .field("chat_id", &self.chat_id)
            .field("session_token", &self.session_token)
            .finish_non_exhaustive()
    }
}

impl ChatSessionController {
    /// Create the chat through the portal API and join its room.
    ///
    /// Fails with a validation error when the customer name is empty, or
    /// with an external-service error when chat creation is rejected —
    /// both are surfaced to the caller for user-visible feedback.
    pub async fn start(
        api: Arc<dyn ChatApi>,
        commands: mpsc::Sender<ClientCommand>,
        events: broadcast::Receiver<ServerEvent>,
        toasts: Arc<dyn ToastSink>,
        config: &ChatConfig,
        form: StartChatForm,
    ) -> AppResult<Self> {
        if form.name.trim().is_empty() {
            return Err(AppError::validation("Customer name must not be empty"));
        }

        let session_token = Uuid::new_v4().to_string();
        let customer = Customer {
            name: form.name,
            email: form.email,
            phone: form.phone,
            session_token: session_token.clone(),
        };

        let chat = api
            .create_chat(CreateChatRequest {
                customer,
                subject: form.subject,
                category: form.category,
                initial_message: form.initial_message,
            })
            .await?;

        let chat_id = chat.id.clone();
        commands
            .try_send(ClientCommand::Join {
                chat_id: chat_id.clone(),
            })
            .map_err(|e| AppError::transport(format!("Failed to join chat room: {e}")))?;

        let chat = Arc::new(Mutex::new(chat));
        let typing = TypingIndicator::new(Duration::from_secs(config.typing_clear_seconds));
        let events_task = spawn_event_loop(
            Arc::clone(&chat),
            chat_id.clone(),
            session_token.clone(),
            Arc::clone(&api),
            Arc::clone(&toasts),
            typing.clone(),
            events,
        );

        Ok(Self {
            chat,
            chat_id,
            session_token,
            api,
            commands,
            typing,
            events_task,
        })
    }

    /// Snapshot of the current chat record.
    pub fn chat(&self) -> Chat {
        self.lock_chat().clone()
    }

    /// The chat identifier.
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// This session's correlation token.
    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    /// Whether the remote party is typing.
    pub fn is_typing(&self) -> bool {
        self.typing.is_typing()
    }

    /// Whether the chat still accepts outbound messages. The UI layer
    /// stops offering the composer once this is false; the controller
    /// itself keeps listening for late events either way.
    pub fn can_send(&self) -> bool {
        !self.lock_chat().status.is_terminal()
    }

    /// Send a message.
    ///
    /// The message is posted to the portal API first; only on success is
    /// it appended locally and relayed on the transport, tagged with this
    /// session's token so our own echoed event is dropped. An HTTP
    /// failure leaves local state untouched and propagates to the caller.
    pub async fn send_message(
        &self,
        content: impl Into<String>,
        kind: MessageKind,
    ) -> AppResult<ChatMessage> {
        let request = PostMessageRequest {
            content: content.into(),
            kind,
        };
        let message = self.api.post_message(&self.chat_id, request).await?;

        self.lock_chat().push_message(message.clone());

        // Relay to other participants. A failed send is not retried.
        let relay = ClientCommand::SendMessage {
            chat_id: self.chat_id.clone(),
            session_token: self.session_token.clone(),
            message: message.clone(),
        };
        if let Err(e) = self.commands.try_send(relay) {
            warn!(error = %e, "Failed to relay message on transport");
        }

        Ok(message)
    }

    fn lock_chat(&self) -> std::sync::MutexGuard<'_, Chat> {
        self.chat.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for ChatSessionController {
    fn drop(&mut self) {
        self.events_task.abort();
    }
}

/// Spawn the task consuming room events for one chat.
fn spawn_event_loop(
    chat: Arc<Mutex<Chat>>,
    chat_id: String,
    session_token: String,
    api: Arc<dyn ChatApi>,
    toasts: Arc<dyn ToastSink>,
    typing: TypingIndicator,
    mut events: broadcast::Receiver<ServerEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    handle_event(
                        &chat,
                        &chat_id,
                        &session_token,
                        &api,
                        &toasts,
                        &typing,
                        event,
                    )
                    .await;
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(chat_id = %chat_id, skipped, "Chat controller fell behind the event stream");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        debug!(chat_id = %chat_id, "Chat event loop ended");
    })
}

/// React to one transport event, ignoring anything scoped to another
/// chat.
async fn handle_event(
    chat: &Mutex<Chat>,
    chat_id: &str,
    session_token: &str,
    api: &Arc<dyn ChatApi>,
    toasts: &Arc<dyn ToastSink>,
    typing: &TypingIndicator,
    event: ServerEvent,
) {
    match event {
        ServerEvent::ChatMessage {
            chat_id: id,
            session_token: origin,
            message,
        } if id == chat_id => {
            // Our own relayed message comes back tagged with our token;
            // appending it again would duplicate the entry.
            if origin.as_deref() == Some(session_token) {
                return;
            }
            let mut chat = chat.lock().unwrap_or_else(|e| e.into_inner());
            chat.push_message(message);
        }
        ServerEvent::Typing {
            chat_id: id,
            session_token: origin,
        } if id == chat_id => {
            if origin != session_token {
                typing.touch();
            }
        }
        ServerEvent::Assignment {
            chat_id: id,
            assigned_to,
        } if id == chat_id => {
            let agent = assigned_to
                .map(|a| a.name)
                .unwrap_or_else(|| "an agent".to_string());
            toasts.show(Toast::info(
                "Chat assigned",
                format!("{agent} is handling your request"),
            ));
            reconcile(chat, api, chat_id, toasts).await;
        }
        ServerEvent::StatusChanged {
            chat_id: id,
            status,
        } if id == chat_id => {
            toasts.show(Toast::info(
                "Chat updated",
                format!("Conversation is now {status}"),
            ));
            reconcile(chat, api, chat_id, toasts).await;
        }
        _ => {}
    }
}

/// Refetch the full chat record to reconcile after an assignment or
/// status event.
async fn reconcile(
    chat: &Mutex<Chat>,
    api: &Arc<dyn ChatApi>,
    chat_id: &str,
    toasts: &Arc<dyn ToastSink>,
) {
    match api.fetch_chat(chat_id).await {
        Ok(fresh) => {
            let mut chat = chat.lock().unwrap_or_else(|e| e.into_inner());
            *chat = fresh;
        }
        Err(e) => {
            warn!(chat_id = %chat_id, error = %e, "Failed to reload chat");
            toasts.show(Toast::error("Failed to load chat", e.message.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use shophub_entity::chat::{AgentRef, ChatStatus, Sender};

    use crate::hub::toast::TracingToastSink;

    /// Portal API stub backed by an in-memory chat record.
    struct MockChatApi {
        chat: Mutex<Option<Chat>>,
        fail_posts: bool,
    }

    impl MockChatApi {
        fn new() -> Self {
            Self {
                chat: Mutex::new(None),
                fail_posts: false,
            }
        }

        fn failing_posts() -> Self {
            Self {
                chat: Mutex::new(None),
                fail_posts: true,
            }
        }

        fn set_chat(&self, chat: Chat) {
            *self.chat.lock().unwrap() = Some(chat);
        }
    }

    #[async_trait]
    impl ChatApi for MockChatApi {
        async fn create_chat(&self, request: CreateChatRequest) -> AppResult<Chat> {
            let chat = Chat {
                id: "chat-1".to_string(),
                customer: request.customer,
                assigned_to: None,
                status: ChatStatus::Waiting,
                priority: None,
                subject: Some(request.subject),
                category: Some(request.category),
                messages: vec![ChatMessage::system(request.initial_message)],
                last_activity: Utc::now(),
            };
            self.set_chat(chat.clone());
            Ok(chat)
        }

        async fn fetch_chat(&self, chat_id: &str) -> AppResult<Chat> {
            self.chat
                .lock()
                .unwrap()
                .clone()
                .filter(|c| c.id == chat_id)
                .ok_or_else(|| AppError::not_found(format!("Chat '{chat_id}' not found")))
        }

        async fn post_message(
            &self,
            _chat_id: &str,
            request: PostMessageRequest,
        ) -> AppResult<ChatMessage> {
            if self.fail_posts {
                return Err(AppError::external_service("Portal API returned 503"));
            }
            Ok(ChatMessage {
                sender: Sender {
                    name: "Dana Whitfield".to_string(),
                    email: None,
                },
                content: request.content,
                kind: request.kind,
                is_read: false,
                created_at: Utc::now(),
            })
        }
    }

    fn form(name: &str) -> StartChatForm {
        StartChatForm {
            name: name.to_string(),
            email: Some("dana@example.com".to_string()),
            phone: None,
            subject: "Brake noise".to_string(),
            category: "repair".to_string(),
            initial_message: "Chat started".to_string(),
        }
    }

    fn agent_message(content: &str) -> ChatMessage {
        ChatMessage {
            sender: Sender {
                name: "Marcus".to_string(),
                email: None,
            },
            content: content.to_string(),
            kind: MessageKind::Text,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    async fn start_controller(
        api: Arc<MockChatApi>,
    ) -> (
        ChatSessionController,
        broadcast::Sender<ServerEvent>,
        mpsc::Receiver<ClientCommand>,
    ) {
        let (events_tx, events_rx) = broadcast::channel(32);
        let (commands_tx, commands_rx) = mpsc::channel(8);

        let controller = ChatSessionController::start(
            api,
            commands_tx,
            events_rx,
            Arc::new(TracingToastSink),
            &ChatConfig::default(),
            form("Dana Whitfield"),
        )
        .await
        .unwrap();

        (controller, events_tx, commands_rx)
    }

    /// Let the spawned event loop drain pending broadcast events.
    async fn settle() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let (events_tx, events_rx) = broadcast::channel(8);
        let (commands_tx, _commands_rx) = mpsc::channel(8);
        drop(events_tx);

        let err = ChatSessionController::start(
            Arc::new(MockChatApi::new()),
            commands_tx,
            events_rx,
            Arc::new(TracingToastSink),
            &ChatConfig::default(),
            form("   "),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind, shophub_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_start_joins_room_with_initial_message() {
        let (controller, _events_tx, mut commands_rx) =
            start_controller(Arc::new(MockChatApi::new())).await;

        match commands_rx.recv().await.unwrap() {
            ClientCommand::Join { chat_id } => assert_eq!(chat_id, "chat-1"),
            other => panic!("Unexpected command: {other:?}"),
        }

        let chat = controller.chat();
        assert_eq!(chat.status, ChatStatus::Waiting);
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].kind, MessageKind::System);
    }

    #[tokio::test]
    async fn test_inbound_messages_are_scoped_to_own_chat() {
        let (controller, events_tx, _commands_rx) =
            start_controller(Arc::new(MockChatApi::new())).await;

        events_tx
            .send(ServerEvent::ChatMessage {
                chat_id: "chat-1".to_string(),
                session_token: None,
                message: agent_message("for us"),
            })
            .unwrap();
        events_tx
            .send(ServerEvent::ChatMessage {
                chat_id: "chat-other".to_string(),
                session_token: None,
                message: agent_message("for someone else"),
            })
            .unwrap();
        settle().await;

        let chat = controller.chat();
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[1].content, "for us");
        // Inbound messages are not auto-marked read.
        assert!(!chat.messages[1].is_read);
    }

    #[tokio::test]
    async fn test_own_echo_is_deduplicated() {
        let (controller, events_tx, _commands_rx) =
            start_controller(Arc::new(MockChatApi::new())).await;

        let sent = controller
            .send_message("On my way", MessageKind::Text)
            .await
            .unwrap();
        assert_eq!(controller.chat().messages.len(), 2);

        // The transport echoes our own relay back, tagged with our token.
        events_tx
            .send(ServerEvent::ChatMessage {
                chat_id: "chat-1".to_string(),
                session_token: Some(controller.session_token().to_string()),
                message: sent,
            })
            .unwrap();
        settle().await;

        assert_eq!(controller.chat().messages.len(), 2);
    }

    #[tokio::test]
    async fn test_send_message_relays_with_session_token() {
        let (controller, _events_tx, mut commands_rx) =
            start_controller(Arc::new(MockChatApi::new())).await;
        let _join = commands_rx.recv().await.unwrap();

        controller
            .send_message("Can you check the alternator?", MessageKind::Text)
            .await
            .unwrap();

        match commands_rx.recv().await.unwrap() {
            ClientCommand::SendMessage {
                chat_id,
                session_token,
                message,
            } => {
                assert_eq!(chat_id, "chat-1");
                assert_eq!(session_token, controller.session_token());
                assert_eq!(message.content, "Can you check the alternator?");
            }
            other => panic!("Unexpected command: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_post_leaves_local_state_unchanged() {
        let (controller, _events_tx, mut commands_rx) =
            start_controller(Arc::new(MockChatApi::failing_posts())).await;
        let _join = commands_rx.recv().await.unwrap();

        let err = controller
            .send_message("will not make it", MessageKind::Text)
            .await
            .unwrap_err();
        assert_eq!(err.kind, shophub_core::error::ErrorKind::ExternalService);

        // Nothing appended, nothing relayed.
        assert_eq!(controller.chat().messages.len(), 1);
        assert!(commands_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_typing_event_from_other_session_sets_flag() {
        let (controller, events_tx, _commands_rx) =
            start_controller(Arc::new(MockChatApi::new())).await;

        events_tx
            .send(ServerEvent::Typing {
                chat_id: "chat-1".to_string(),
                session_token: "someone-else".to_string(),
            })
            .unwrap();
        settle().await;
        assert!(controller.is_typing());
    }

    #[tokio::test]
    async fn test_own_typing_event_is_ignored() {
        let (controller, events_tx, _commands_rx) =
            start_controller(Arc::new(MockChatApi::new())).await;

        events_tx
            .send(ServerEvent::Typing {
                chat_id: "chat-1".to_string(),
                session_token: controller.session_token().to_string(),
            })
            .unwrap();
        settle().await;
        assert!(!controller.is_typing());
    }

    #[tokio::test]
    async fn test_assignment_event_reconciles_from_api() {
        let api = Arc::new(MockChatApi::new());
        let (controller, events_tx, _commands_rx) = start_controller(Arc::clone(&api)).await;

        // The backend has since assigned an agent.
        let mut updated = controller.chat();
        updated.assigned_to = Some(AgentRef {
            id: "agent-7".to_string(),
            name: "Marcus".to_string(),
            email: None,
        });
        updated.status = ChatStatus::Active;
        api.set_chat(updated);

        events_tx
            .send(ServerEvent::Assignment {
                chat_id: "chat-1".to_string(),
                assigned_to: Some(AgentRef {
                    id: "agent-7".to_string(),
                    name: "Marcus".to_string(),
                    email: None,
                }),
            })
            .unwrap();
        settle().await;

        let chat = controller.chat();
        assert_eq!(chat.assigned_to.as_ref().unwrap().name, "Marcus");
        assert_eq!(chat.status, ChatStatus::Active);
    }

    #[tokio::test]
    async fn test_terminal_status_stops_sending_but_keeps_listening() {
        let api = Arc::new(MockChatApi::new());
        let (controller, events_tx, _commands_rx) = start_controller(Arc::clone(&api)).await;

        let mut updated = controller.chat();
        updated.status = ChatStatus::Resolved;
        api.set_chat(updated);

        events_tx
            .send(ServerEvent::StatusChanged {
                chat_id: "chat-1".to_string(),
                status: ChatStatus::Resolved,
            })
            .unwrap();
        settle().await;

        assert!(!controller.can_send());

        // Late-arriving events are still applied without error.
        events_tx
            .send(ServerEvent::ChatMessage {
                chat_id: "chat-1".to_string(),
                session_token: None,
                message: agent_message("thanks, closing up"),
            })
            .unwrap();
        settle().await;

        let chat = controller.chat();
        assert_eq!(chat.messages.last().unwrap().content, "thanks, closing up");
    }

    #[tokio::test]
    async fn test_two_chats_receive_only_their_own_interleaved_events() {
        let api_a = Arc::new(MockChatApi::new());
        let (events_tx, _) = broadcast::channel(32);
        let (commands_tx, _commands_rx) = mpsc::channel(16);

        let controller_a = ChatSessionController::start(
            Arc::clone(&api_a) as Arc<dyn ChatApi>,
            commands_tx.clone(),
            events_tx.subscribe(),
            Arc::new(TracingToastSink),
            &ChatConfig::default(),
            form("Dana Whitfield"),
        )
        .await
        .unwrap();

        // Second controller against its own backend record.
        struct SecondApi;
        #[async_trait]
        impl ChatApi for SecondApi {
            async fn create_chat(&self, request: CreateChatRequest) -> AppResult<Chat> {
                Ok(Chat {
                    id: "chat-2".to_string(),
                    customer: request.customer,
                    assigned_to: None,
                    status: ChatStatus::Waiting,
                    priority: None,
                    subject: Some(request.subject),
                    category: Some(request.category),
                    messages: vec![ChatMessage::system(request.initial_message)],
                    last_activity: Utc::now(),
                })
            }
            async fn fetch_chat(&self, _chat_id: &str) -> AppResult<Chat> {
                Err(AppError::not_found("unused"))
            }
            async fn post_message(
                &self,
                _chat_id: &str,
                _request: PostMessageRequest,
            ) -> AppResult<ChatMessage> {
                Err(AppError::not_found("unused"))
            }
        }

        let controller_b = ChatSessionController::start(
            Arc::new(SecondApi),
            commands_tx,
            events_tx.subscribe(),
            Arc::new(TracingToastSink),
            &ChatConfig::default(),
            form("Lee Okafor"),
        )
        .await
        .unwrap();

        // Interleave events for both rooms.
        for (chat_id, content) in [
            ("chat-1", "a1"),
            ("chat-2", "b1"),
            ("chat-1", "a2"),
            ("chat-2", "b2"),
        ] {
            events_tx
                .send(ServerEvent::ChatMessage {
                    chat_id: chat_id.to_string(),
                    session_token: None,
                    message: agent_message(content),
                })
                .unwrap();
        }
        settle().await;

        let contents_a: Vec<String> = controller_a
            .chat()
            .messages
            .iter()
            .skip(1)
            .map(|m| m.content.clone())
            .collect();
        let contents_b: Vec<String> = controller_b
            .chat()
            .messages
            .iter()
            .skip(1)
            .map(|m| m.content.clone())
            .collect();

        assert_eq!(contents_a, vec!["a1", "a2"]);
        assert_eq!(contents_b, vec!["b1", "b2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_flag_auto_clears() {
        let (controller, events_tx, _commands_rx) =
            start_controller(Arc::new(MockChatApi::new())).await;

        events_tx
            .send(ServerEvent::Typing {
                chat_id: "chat-1".to_string(),
                session_token: "agent-session".to_string(),
            })
            .unwrap();
        settle().await;
        assert!(controller.is_typing());

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(!controller.is_typing());
    }
}
