//! Error types for the Appwrite provider

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Appwrite provider errors
#[derive(Error, Debug)]
pub enum AppwriteError {
    /// The API answered with a non-2xx status. Displays the server message
    /// verbatim so it can be shown to users.
    #[error("{message}")]
    Api {
        status: u16,
        kind: Option<String>,
        message: String,
    },

    /// Failed to parse API response
    #[error("Failed to parse Appwrite response: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Result type for Appwrite operations
pub type Result<T> = std::result::Result<T, AppwriteError>;

impl From<AppwriteError> for BridgeError {
    fn from(error: AppwriteError) -> Self {
        match error {
            AppwriteError::Api {
                status,
                kind,
                message,
            } => BridgeError::Remote {
                status: Some(status),
                kind,
                message,
            },
            AppwriteError::Parse(msg) => {
                BridgeError::OperationFailed(format!("Parse error: {}", msg))
            }
            AppwriteError::InvalidRequest(msg) => BridgeError::OperationFailed(msg),
            AppwriteError::Bridge(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_server_message() {
        let error = AppwriteError::Api {
            status: 429,
            kind: Some("general_rate_limit_exceeded".to_string()),
            message: "Rate limit for the current endpoint has been exceeded.".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Rate limit for the current endpoint has been exceeded."
        );

        let bridge_error: BridgeError = error.into();
        assert_eq!(bridge_error.status(), Some(429));
        assert_eq!(
            bridge_error.to_string(),
            "Rate limit for the current endpoint has been exceeded."
        );
    }

    #[test]
    fn test_parse_error_conversion() {
        let bridge_error: BridgeError = AppwriteError::Parse("missing $id".to_string()).into();
        assert!(matches!(bridge_error, BridgeError::OperationFailed(_)));
    }
}
