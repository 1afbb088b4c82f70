//! Error types for the SeamlessPay API SDK.
//!
//! This module contains the configuration error type used by the validated
//! newtypes and builders in [`crate::config`].
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. An invalid option is reported when the value is
//! constructed, never later when a request is sent.
//!
//! # Example
//!
//! ```rust
//! use seamlesspay_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("   ");
//! assert!(matches!(result, Err(ConfigError::EmptyOption { field: "api_key" })));
//! ```

use thiserror::Error;

/// Maximum length of an idempotency key, in characters.
pub const MAX_IDEMPOTENCY_KEY_LENGTH: usize = 255;

/// Errors that can occur during SDK configuration.
///
/// Each variant names the offending option so that callers can surface an
/// actionable message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A string option was empty after trimming.
    #[error("Empty {field} specified!")]
    EmptyOption {
        /// The name of the offending option.
        field: &'static str,
    },

    /// The idempotency key exceeds the maximum length.
    #[error("Idempotency key length was {length}, which is larger than the 255 character maximum!")]
    IdempotencyKeyTooLong {
        /// The actual length of the trimmed key.
        length: usize,
    },

    /// An endpoint URL (API base or proxy) is invalid.
    #[error("Invalid {field} URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.seamlesspay.com').")]
    InvalidUrl {
        /// The name of the option holding the URL.
        field: &'static str,
        /// The invalid URL that was provided.
        url: String,
    },

    /// A string option cannot be sent as an HTTP header value.
    #[error("Invalid {field}: must be a valid HTTP header value.")]
    InvalidHeaderValue {
        /// The name of the offending option.
        field: &'static str,
    },

    /// A timeout option was zero.
    #[error("Invalid {field}: timeouts must be greater than zero.")]
    InvalidTimeout {
        /// The name of the offending timeout option.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_option_error_names_field() {
        let error = ConfigError::EmptyOption {
            field: "idempotency_key",
        };
        assert_eq!(error.to_string(), "Empty idempotency_key specified!");
    }

    #[test]
    fn test_idempotency_key_too_long_reports_length() {
        let error = ConfigError::IdempotencyKeyTooLong { length: 256 };
        let message = error.to_string();
        assert!(message.contains("256"));
        assert!(message.contains("255 character maximum"));
    }

    #[test]
    fn test_invalid_url_error_message() {
        let error = ConfigError::InvalidUrl {
            field: "proxy",
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("proxy"));
        assert!(message.contains("not a url"));
    }

    #[test]
    fn test_invalid_header_value_message() {
        let error = ConfigError::InvalidHeaderValue {
            field: "user_agent_prefix",
        };
        assert_eq!(
            error.to_string(),
            "Invalid user_agent_prefix: must be a valid HTTP header value."
        );
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::InvalidTimeout {
            field: "read_timeout",
        };
        let _: &dyn std::error::Error = &error;
    }
}
