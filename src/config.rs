//! # Application Configuration
//!
//! Environment-driven configuration for the bot. Values are loaded once at
//! startup, validated, and shared read-only across handlers. A validation
//! failure here is fatal: the process exits non-zero before any transport
//! work starts.

use crate::errors::{BotError, BotResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Default long-poll timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Bot configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Telegram bot token
    pub token: String,
    /// Verbose transport logging
    pub debug: bool,
    /// Long-poll timeout in seconds
    pub timeout_secs: u64,
    /// Privileged user IDs allowed to run /settings
    pub admin_ids: Vec<i64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            debug: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            admin_ids: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `BOT_TOKEN` (required), `BOT_DEBUG`,
    /// `BOT_TIMEOUT_SECS`, `BOT_ADMIN_IDS` (comma-separated integer list).
    pub fn from_env() -> BotResult<Self> {
        let token = env::var("BOT_TOKEN")
            .map_err(|_| BotError::Config("BOT_TOKEN environment variable is required".to_string()))?;

        let debug = match env::var("BOT_DEBUG") {
            Ok(value) => match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => {
                    return Err(BotError::Config(format!(
                        "BOT_DEBUG must be a boolean, got '{}'",
                        other
                    )))
                }
            },
            Err(_) => false,
        };

        let timeout_secs = match env::var("BOT_TIMEOUT_SECS") {
            Ok(value) => value.trim().parse::<u64>().map_err(|_| {
                BotError::Config("BOT_TIMEOUT_SECS must be a valid number of seconds".to_string())
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let admin_ids = match env::var("BOT_ADMIN_IDS") {
            Ok(value) => parse_admin_ids(&value)?,
            Err(_) => Vec::new(),
        };

        let config = Self {
            token,
            debug,
            timeout_secs,
            admin_ids,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> BotResult<()> {
        if self.token.trim().is_empty() {
            return Err(BotError::Config("Bot token cannot be empty".to_string()));
        }

        // Basic bot token format validation
        let parts: Vec<&str> = self.token.split(':').collect();
        if parts.len() != 2 {
            return Err(BotError::Config(
                "Bot token format is invalid. Expected format: 'bot_id:bot_token'".to_string(),
            ));
        }

        if parts[0].parse::<u64>().is_err() {
            return Err(BotError::Config(
                "Bot token bot ID must be numeric".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(BotError::Config(
                "Long-poll timeout cannot be 0".to_string(),
            ));
        }

        if self.timeout_secs > 300 {
            return Err(BotError::Config(
                "Long-poll timeout cannot be greater than 300 seconds".to_string(),
            ));
        }

        Ok(())
    }

    /// Check whether a user ID belongs to the admin list
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// HTTP client timeout in seconds. Sits above the long-poll timeout so
    /// an idle getUpdates call is never cut short by the client.
    pub fn http_timeout_secs(&self) -> u64 {
        self.timeout_secs + 10
    }
}

/// Parse a comma-separated list of admin user IDs
fn parse_admin_ids(raw: &str) -> BotResult<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>().map_err(|_| {
                BotError::Config(format!("BOT_ADMIN_IDS contains a non-numeric entry: '{}'", part))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            token: "123456:sometesttokenvalue".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_token_rejected() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(BotError::Config(_))));
    }

    #[test]
    fn test_token_without_colon_rejected() {
        let config = Config {
            token: "not-a-token".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = valid_config();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.timeout_secs = 301;
        assert!(config.validate().is_err());
        config.timeout_secs = 60;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_timeout_exceeds_poll_timeout() {
        // The client timeout must leave room for a full idle long poll
        let mut config = valid_config();
        config.timeout_secs = 1;
        assert!(config.http_timeout_secs() > config.timeout_secs);
        config.timeout_secs = 300;
        assert!(config.http_timeout_secs() > config.timeout_secs);
    }

    #[test]
    fn test_parse_admin_ids() {
        assert_eq!(parse_admin_ids("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_admin_ids("").unwrap(), Vec::<i64>::new());
        assert!(parse_admin_ids("1,abc").is_err());
    }

    #[test]
    fn test_is_admin() {
        let config = Config {
            admin_ids: vec![1, 2],
            ..valid_config()
        };
        assert!(config.is_admin(1));
        assert!(!config.is_admin(7));
    }
}
