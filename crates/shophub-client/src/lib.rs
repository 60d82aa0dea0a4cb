//! # shophub-client
//!
//! HTTP clients for the portal API collaborators the realtime engine
//! depends on: chat creation, chat fetch, and message posting. The
//! [`ChatApi`] trait is the seam consumed by the chat session controller.

pub mod chat;
pub mod types;

pub use chat::{ChatApi, HttpChatApi};
pub use types::{CreateChatRequest, PostMessageRequest};
