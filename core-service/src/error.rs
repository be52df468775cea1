use thiserror::Error;

/// Errors surfaced by the service façade.
///
/// Auth, content and backend failures display their inner message
/// unchanged so hosts can show it to the user.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Core initialization failed: {0}")]
    Runtime(#[from] core_runtime::Error),

    #[error(transparent)]
    Auth(#[from] core_auth::AuthError),

    #[error(transparent)]
    Content(#[from] core_content::ContentError),

    #[error(transparent)]
    Backend(#[from] bridge_traits::BridgeError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
