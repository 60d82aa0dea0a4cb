//! Frame validation and parsing.
//!
//! Every inbound frame goes through [`parse_event`] so that malformed
//! payloads fail at one clear chokepoint instead of inside handlers.

use shophub_core::{AppError, AppResult};

use super::types::{ClientCommand, ServerEvent};

/// Parse an inbound text frame into a typed server event.
pub fn parse_event(raw: &str, max_frame_bytes: usize) -> AppResult<ServerEvent> {
    if raw.len() > max_frame_bytes {
        return Err(AppError::validation(format!(
            "Frame exceeds maximum size of {max_frame_bytes} bytes"
        )));
    }

    if raw.trim().is_empty() {
        return Err(AppError::validation("Empty frame"));
    }

    serde_json::from_str(raw)
        .map_err(|e| AppError::serialization(format!("Malformed event frame: {e}")))
}

/// Encode an outbound command as a text frame.
pub fn encode_command(command: &ClientCommand) -> AppResult<String> {
    serde_json::to_string(command)
        .map_err(|e| AppError::serialization(format!("Failed to encode command: {e}")))
}
