//! Configuration and settings management
//!
//! Loads settings from environment variables and defines the relay constants.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Application settings loaded from environment variables
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Telegram Bot API token
    #[serde(default)]
    pub telegram_token: String,

    /// Listening port for the keepalive HTTP server
    #[serde(default = "default_port")]
    pub port: u16,

    /// Optional shared secret guarding `/ping` and `/health`
    pub keepalive_secret: Option<String>,
}

const fn default_port() -> u16 {
    8080
}

impl Settings {
    /// Create new settings by loading from environment and files
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails or no bot token is configured.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(File::with_name("config/default").required(false))
            // Add in the current environment file
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked into git
            .add_source(File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of APP)
            .add_source(Environment::with_prefix("APP").separator("__"))
            // Also add settings from environment variables directly (without prefix)
            // ignore_empty treats empty env vars as unset
            .add_source(Environment::default().ignore_empty(true))
            .build()?;

        let mut settings: Self = s.try_deserialize()?;

        // Fallback: the original deployment exported the credential as BOT_TOKEN
        if settings.telegram_token.is_empty() {
            if let Ok(val) = std::env::var("BOT_TOKEN") {
                if !val.is_empty() {
                    settings.telegram_token = val;
                }
            }
        }
        if settings.keepalive_secret.is_none() {
            if let Ok(val) = std::env::var("KEEPALIVE_SECRET") {
                if !val.is_empty() {
                    settings.keepalive_secret = Some(val);
                }
            }
        }

        if settings.telegram_token.is_empty() {
            return Err(ConfigError::NotFound("telegram_token".to_string()));
        }

        Ok(settings)
    }
}

/// Host of the external resolution API; inputs already targeting it are
/// passed through as pre-built requests
pub const RESOLVER_HOST: &str = "teradl.tiiny.io";
/// Fixed API key baked into the outbound request template
pub const RESOLVER_KEY: &str = "RushVx";

/// Seconds a user must wait between link submissions
pub const COOLDOWN_SECONDS: u64 = 15;
/// Read timeout for the outbound resolver fetch, in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 20;

/// Bind address for the keepalive server
pub const WEB_HOST: [u8; 4] = [0, 0, 0, 0];

/// Attribution line appended to every user-facing reply
pub const FOOTER: &str = "— Powered by @Regnis";
