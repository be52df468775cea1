use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// A non-transient failure from the identity service; carries the
    /// remote message unchanged.
    #[error("{0}")]
    PermanentFailure(String),

    #[error("Maximum number of sign-in attempts exceeded ({attempts})")]
    ExhaustedRetries { attempts: u32 },

    #[error("Invalid retry policy: {0}")]
    InvalidRetryPolicy(String),

    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    AccountCreationFailed(String),

    #[error("Invalid user document: {0}")]
    InvalidDocument(String),

    #[error(transparent)]
    Backend(#[from] BridgeError),
}

impl AuthError {
    /// Text suitable for showing to the end user as-is.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_failure_displays_remote_message() {
        let err = AuthError::PermanentFailure(
            "Invalid credentials. Please check the email and password.".to_string(),
        );
        assert_eq!(
            err.message(),
            "Invalid credentials. Please check the email and password."
        );
    }

    #[test]
    fn backend_errors_are_transparent() {
        let err: AuthError = BridgeError::remote("User (role: guests) missing scope (account)").into();
        assert_eq!(err.message(), "User (role: guests) missing scope (account)");
    }

    #[test]
    fn account_creation_failure_displays_remote_message() {
        let err = AuthError::AccountCreationFailed(
            "A user with the same id, email, or phone already exists in this project.".to_string(),
        );
        assert_eq!(
            err.message(),
            "A user with the same id, email, or phone already exists in this project."
        );
    }

    #[test]
    fn exhausted_retries_names_attempts() {
        let err = AuthError::ExhaustedRetries { attempts: 3 };
        assert!(err.message().contains('3'));
    }
}
