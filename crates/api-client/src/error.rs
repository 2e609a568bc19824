//! Error types for the API client

use crate::envelope::SubError;
use thiserror::Error;
use velora_core::validation::ValidationError;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token storage failed
    #[error("Token storage error: {0}")]
    Storage(String),

    /// The backend returned a non-success HTTP status without an envelope
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// The backend reported a business error (`isSuccess: false`)
    #[error("{message}")]
    Backend {
        /// Envelope message
        message: String,
        /// Field-level errors reported by the backend
        sub_errors: Vec<SubError>,
    },

    /// Input failed client-side validation before any request was issued
    #[error("Validation failed: {}", format_validation_errors(.errors))]
    Validation {
        /// Field-level validation errors
        errors: Vec<ValidationError>,
    },

    /// The request was unauthorized and the replay after refresh failed too
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The session could not be renewed; tokens have been cleared
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// A refresh was required but no refresh token is stored
    #[error("No refresh token available")]
    MissingRefreshToken,

    /// No session is active for an operation that requires one
    #[error("Not authenticated")]
    NotAuthenticated,
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an API response error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a backend business error
    pub fn backend(message: impl Into<String>, sub_errors: Vec<SubError>) -> Self {
        Self::Backend {
            message: message.into(),
            sub_errors,
        }
    }

    /// Check if this error ends the current session
    #[must_use]
    pub fn is_terminal_auth(&self) -> bool {
        matches!(
            self,
            Self::SessionExpired(_) | Self::MissingRefreshToken | Self::Unauthorized(_)
        )
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}

impl From<velora_core::validation::ValidationResult> for ApiError {
    fn from(result: velora_core::validation::ValidationResult) -> Self {
        Self::Validation {
            errors: result.errors().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_auth_classification() {
        assert!(ApiError::SessionExpired("refresh rejected".into()).is_terminal_auth());
        assert!(ApiError::MissingRefreshToken.is_terminal_auth());
        assert!(!ApiError::api(500, "boom").is_terminal_auth());
    }

    #[test]
    fn test_status_classification() {
        assert!(ApiError::api(404, "missing").is_client_error());
        assert!(ApiError::api(502, "bad gateway").is_server_error());
        assert!(!ApiError::api(502, "bad gateway").is_client_error());
    }

    #[test]
    fn test_backend_error_display() {
        let err = ApiError::backend("Category name already exists", Vec::new());
        assert_eq!(err.to_string(), "Category name already exists");
    }
}
