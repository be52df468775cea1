use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    /// An error reported by the hosted backend itself.
    ///
    /// Displays as the backend's message verbatim so it can be surfaced to
    /// the end user unchanged.
    #[error("{message}")]
    Remote {
        status: Option<u16>,
        kind: Option<String>,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Build a [`BridgeError::Remote`] that carries only a message.
    pub fn remote(message: impl Into<String>) -> Self {
        BridgeError::Remote {
            status: None,
            kind: None,
            message: message.into(),
        }
    }

    /// The underlying message without the variant's display prefix.
    pub fn message(&self) -> String {
        match self {
            BridgeError::NotAvailable(message) | BridgeError::OperationFailed(message) => {
                message.clone()
            }
            BridgeError::Remote { message, .. } => message.clone(),
            BridgeError::Io(error) => error.to_string(),
        }
    }

    /// HTTP status reported by the backend, if this is a remote error.
    pub fn status(&self) -> Option<u16> {
        match self {
            BridgeError::Remote { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
