//! Account lifecycle on top of the remote identity service.

use std::sync::Arc;

use bridge_traits::{AccountHandle, CollectionRef, Query, RemoteBackend, Session, CURRENT_SESSION};
use core_runtime::config::BackendConfig;
use core_runtime::logging::redact_if_sensitive;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::establisher::SessionEstablisher;
use crate::types::{Credentials, UserProfile};

/// Sign-up, sign-in, sign-out and current-user lookup.
///
/// Holds no session state of its own; the backend connector carries the
/// active session between calls.
pub struct AccountManager {
    backend: Arc<dyn RemoteBackend>,
    establisher: SessionEstablisher,
    users: CollectionRef,
}

impl AccountManager {
    pub fn new(backend: Arc<dyn RemoteBackend>, config: &BackendConfig) -> Self {
        let establisher = SessionEstablisher::new(Arc::clone(&backend));
        Self::with_establisher(backend, config, establisher)
    }

    /// Use a custom establisher (retry policy or classification).
    pub fn with_establisher(
        backend: Arc<dyn RemoteBackend>,
        config: &BackendConfig,
        establisher: SessionEstablisher,
    ) -> Self {
        Self {
            backend,
            establisher,
            users: config.users(),
        }
    }

    pub fn establisher(&self) -> &SessionEstablisher {
        &self.establisher
    }

    /// Register an account, sign in, and store its profile document.
    ///
    /// The profile carries the account id, e-mail, username and an initials
    /// avatar URL.
    #[instrument(
        skip(self, credentials),
        fields(identifier = %redact_if_sensitive("identifier", &credentials.identifier))
    )]
    pub async fn sign_up(&self, credentials: &Credentials, username: &str) -> Result<UserProfile> {
        let account = self
            .backend
            .create_account(&credentials.identifier, &credentials.secret, username)
            .await
            .map_err(|e| AuthError::AccountCreationFailed(e.message()))?;

        let avatar = self.backend.avatar_initials(username)?;

        self.establisher.establish(credentials).await?;

        let mut fields = Map::new();
        fields.insert("accountId".to_string(), Value::String(account.id.clone()));
        fields.insert(
            "email".to_string(),
            Value::String(credentials.identifier.clone()),
        );
        fields.insert("username".to_string(), Value::String(username.to_string()));
        fields.insert("avatar".to_string(), Value::String(avatar));

        let document_id = Uuid::new_v4().simple().to_string();
        let document = self
            .backend
            .create_document(&self.users, &document_id, fields)
            .await?;

        info!(account_id = %account.id, "Account created");
        UserProfile::try_from(document)
    }

    /// Establish a session for existing credentials.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        self.establisher.establish(credentials).await
    }

    /// Delete the active session.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<()> {
        self.backend.delete_session(CURRENT_SESSION).await?;
        info!("Signed out");
        Ok(())
    }

    pub async fn current_account(&self) -> Result<AccountHandle> {
        Ok(self.backend.get_current_account().await?)
    }

    /// Profile of the signed-in user.
    ///
    /// Any failure, including an unauthenticated client, is logged and
    /// reported as `None`.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Option<UserProfile> {
        match self.find_current_user().await {
            Ok(profile) => Some(profile),
            Err(error) => {
                warn!(error = %error, "No current user");
                None
            }
        }
    }

    async fn find_current_user(&self) -> Result<UserProfile> {
        let account = self.current_account().await?;

        let document = self
            .backend
            .list_documents(&self.users, &[Query::equal("accountId", account.id.as_str())])
            .await?
            .into_iter()
            .next()
            .ok_or(AuthError::UserNotFound)?;

        UserProfile::try_from(document)
    }
}
