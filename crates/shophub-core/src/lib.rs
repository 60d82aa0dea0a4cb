//! # shophub-core
//!
//! Core crate for the ShopHub realtime engine. Contains configuration
//! schemas and the unified error system shared by every other crate.
//!
//! This crate has **no** internal dependencies on other ShopHub crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
