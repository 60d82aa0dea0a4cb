//! Chat collaborator client.

use async_trait::async_trait;
use tracing::debug;

use shophub_core::config::portal::PortalConfig;
use shophub_core::{AppError, AppResult};
use shophub_entity::chat::{Chat, ChatMessage};

use crate::types::{CreateChatRequest, PostMessageRequest};

/// The three portal API operations the chat session controller consumes.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Create a new chat session. Returns the full server-side record
    /// including its assigned identifier.
    async fn create_chat(&self, request: CreateChatRequest) -> AppResult<Chat>;

    /// Fetch the full chat record by identifier.
    async fn fetch_chat(&self, chat_id: &str) -> AppResult<Chat>;

    /// Post a message into a chat. Returns the created message.
    async fn post_message(
        &self,
        chat_id: &str,
        request: PostMessageRequest,
    ) -> AppResult<ChatMessage>;
}

/// `ChatApi` implementation over the portal HTTP API.
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    /// Shared HTTP client.
    http: reqwest::Client,
    /// Portal API base URL, without trailing slash.
    base_url: String,
}

impl HttpChatApi {
    /// Create a client from portal configuration.
    pub fn new(config: &PortalConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::external_service(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Map a non-success status into an external-service error.
    async fn check_status(response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::external_service(format!(
            "Portal API returned {status}: {body}"
        )))
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn create_chat(&self, request: CreateChatRequest) -> AppResult<Chat> {
        let url = format!("{}/chats", self.base_url);
        debug!(url = %url, subject = %request.subject, "Creating chat");

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Chat creation failed: {e}")))?;

        Self::check_status(response)
            .await?
            .json::<Chat>()
            .await
            .map_err(|e| AppError::external_service(format!("Invalid chat response: {e}")))
    }

    async fn fetch_chat(&self, chat_id: &str) -> AppResult<Chat> {
        let url = format!("{}/chats/{chat_id}", self.base_url);
        debug!(url = %url, "Fetching chat");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Chat fetch failed: {e}")))?;

        Self::check_status(response)
            .await?
            .json::<Chat>()
            .await
            .map_err(|e| AppError::external_service(format!("Invalid chat response: {e}")))
    }

    async fn post_message(
        &self,
        chat_id: &str,
        request: PostMessageRequest,
    ) -> AppResult<ChatMessage> {
        let url = format!("{}/chats/{chat_id}/messages", self.base_url);
        debug!(url = %url, "Posting message");

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Message post failed: {e}")))?;

        Self::check_status(response)
            .await?
            .json::<ChatMessage>()
            .await
            .map_err(|e| AppError::external_service(format!("Invalid message response: {e}")))
    }
}
