use bridge_traits::error::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("Invalid video document: {0}")]
    InvalidDocument(String),
}

impl ContentError {
    /// Text suitable for showing to the end user as-is.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
