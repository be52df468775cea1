use bridge_traits::{Document, Session};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AuthError;

/// Email/password pair supplied by the caller for one sign-in.
///
/// Never persisted. `Debug` output masks the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Result of a single session-creation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success(Session),
    /// Expected to clear up if retried after a delay
    TransientFailure(String),
    PermanentFailure(String),
}

/// Profile document stored alongside each account in the users collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub account_id: String,
    pub email: String,
    pub username: String,
    /// Avatar URL (initials rendered by the backend)
    pub avatar: String,
}

impl TryFrom<Document> for UserProfile {
    type Error = AuthError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        let field = |name: &str| {
            document
                .str_field(name)
                .map(str::to_string)
                .ok_or_else(|| {
                    AuthError::InvalidDocument(format!(
                        "document {} is missing '{}'",
                        document.id, name
                    ))
                })
        };

        Ok(Self {
            account_id: field("accountId")?,
            email: field("email")?,
            username: field("username")?,
            avatar: field("avatar")?,
            id: document.id.clone(),
        })
    }
}
