//! Error types for the Solace support assistant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole Solace workspace.
///
/// The pipeline itself never fails on user input. Errors come from missing or
/// invalid configuration, from the optional completion provider, or from
/// reading catalog and secret files.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SolaceError {
    /// Configuration error (missing template/keyword data, bad policy, missing credential)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote completion provider failed
    #[error("Provider error{}: {message}", status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Provider {
        status: Option<u16>,
        message: String,
        retryable: bool,
    },

    /// A request handed to the chat endpoint could not be understood
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },
}

impl SolaceError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Provider error
    pub fn provider(status: Option<u16>, message: impl Into<String>, retryable: bool) -> Self {
        Self::Provider {
            status,
            message: message.into(),
            retryable,
        }
    }

    /// Creates an InvalidRequest error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a provider error
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Whether retrying the same call may succeed.
    ///
    /// Only provider errors flagged by the provider (rate limits, 5xx,
    /// timeouts, dropped connections) are retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider { retryable: true, .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SolaceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SolaceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SolaceError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SolaceError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SolaceError>`.
pub type Result<T> = std::result::Result<T, SolaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display_includes_status() {
        let err = SolaceError::provider(Some(503), "upstream unavailable", true);
        assert_eq!(
            err.to_string(),
            "Provider error (status 503): upstream unavailable"
        );
        assert!(err.is_provider());
        assert!(err.is_retryable());
    }

    #[test]
    fn test_provider_error_without_status() {
        let err = SolaceError::provider(None, "timed out", true);
        assert_eq!(err.to_string(), "Provider error: timed out");
    }

    #[test]
    fn test_config_error_is_not_retryable() {
        let err = SolaceError::config("OPENAI_API_KEY not configured");
        assert!(err.is_config());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_toml_error_conversion() {
        let err: SolaceError = toml::from_str::<toml::Value>("= broken")
            .unwrap_err()
            .into();
        assert!(err.is_serialization());
    }
}
