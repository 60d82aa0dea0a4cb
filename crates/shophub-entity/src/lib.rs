//! # shophub-entity
//!
//! Domain entity models for the ShopHub realtime engine. Every struct in
//! this crate is a domain value object carried across the transport, the
//! notification hub, or the local store. All entities derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`.

pub mod chat;
pub mod notification;
