//! # Application Error Types
//!
//! Common error types used throughout the course-menu bot. Handler-level
//! errors are converted into user-visible notices before they reach the
//! dispatch loop; anything that still escapes is logged and swallowed there.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum BotError {
    /// Configuration validation errors (fatal at startup)
    Config(String),
    /// Transport send/edit/ack failures (logged, swallowed)
    Transport(String),
    /// Malformed callback payloads (non-numeric page or course id)
    Parse(String),
    /// Lookup misses (course id with no catalog entry)
    NotFound(String),
    /// Non-admin invoked an admin-gated command
    Unauthorized,
    /// Internal application errors
    Internal(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            BotError::Transport(msg) => write!(f, "[TRANSPORT] {}", msg),
            BotError::Parse(msg) => write!(f, "[PARSE] {}", msg),
            BotError::NotFound(msg) => write!(f, "[NOT_FOUND] {}", msg),
            BotError::Unauthorized => write!(f, "[UNAUTHORIZED] admin-only command"),
            BotError::Internal(msg) => write!(f, "[INTERNAL] {}", msg),
        }
    }
}

impl std::error::Error for BotError {}

impl From<anyhow::Error> for BotError {
    fn from(err: anyhow::Error) -> Self {
        BotError::Internal(err.to_string())
    }
}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        BotError::Transport(err.to_string())
    }
}

/// Result type alias for convenience
pub type BotResult<T> = Result<T, BotError>;

/// Standardized error logging utilities for consistent error reporting
pub mod error_logging {
    use teloxide::types::ChatId;
    use tracing::error;

    /// Log transport send/edit/ack failures with chat context
    pub fn log_transport_error(error: &impl std::fmt::Display, operation: &str, chat_id: ChatId) {
        error!(
            error = %error,
            operation = %operation,
            chat_id = %chat_id,
            "Transport operation failed"
        );
    }

    /// Log handler failures surfaced to the dispatch loop
    pub fn log_handler_error(
        error: &impl std::fmt::Display,
        handler: &str,
        chat_id: Option<ChatId>,
    ) {
        error!(
            error = %error,
            handler = %handler,
            chat_id = ?chat_id,
            "Update handler failed"
        );
    }

    /// Log configuration errors during startup
    pub fn log_config_error(error: &impl std::fmt::Display, config_key: &str) {
        error!(
            error = %error,
            config_key = %config_key,
            "Configuration error"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_formatting() {
        let config_error = BotError::Config("token cannot be empty".to_string());
        assert_eq!(format!("{}", config_error), "[CONFIG] token cannot be empty");

        let parse_error = BotError::Parse("bad page suffix".to_string());
        assert_eq!(format!("{}", parse_error), "[PARSE] bad page suffix");

        assert_eq!(
            format!("{}", BotError::Unauthorized),
            "[UNAUTHORIZED] admin-only command"
        );
    }
}
