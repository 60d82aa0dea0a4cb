//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod chat;
pub mod logging;
pub mod notifications;
pub mod portal;
pub mod realtime;
pub mod store;

use serde::{Deserialize, Serialize};

use self::chat::ChatConfig;
use self::logging::LoggingConfig;
use self::notifications::NotificationsConfig;
use self::portal::PortalConfig;
use self::realtime::RealtimeConfig;
use self::store::StoreConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Portal HTTP API settings.
    #[serde(default)]
    pub portal: PortalConfig,
    /// Real-time transport settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Chat session settings.
    #[serde(default)]
    pub chat: ChatConfig,
    /// Notification hub settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Local persistence settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `SHOPHUB_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SHOPHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            portal: PortalConfig::default(),
            realtime: RealtimeConfig::default(),
            chat: ChatConfig::default(),
            notifications: NotificationsConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.realtime.reconnect_delay_seconds, 5);
        assert_eq!(config.chat.typing_clear_seconds, 3);
        assert_eq!(config.notifications.approval_cost_threshold, 500.0);
    }
}
