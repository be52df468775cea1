//! Retrying session establishment.

use std::sync::Arc;

use bridge_traits::error::Result as BridgeResult;
use bridge_traits::{RemoteBackend, Session};
use core_async::time::sleep;
use core_runtime::logging::redact_if_sensitive;
use tracing::{debug, instrument, warn};

use crate::error::{AuthError, Result};
use crate::retry::{RateLimitPolicy, RetryPolicy, TransientErrorPolicy};
use crate::types::{AttemptOutcome, Credentials};

/// Obtains a [`Session`] for a set of credentials, absorbing transient
/// identity-service failures so callers never see them.
///
/// Each invocation is independent: there is no shared state between calls,
/// no session caching and no cancellation. Concurrent calls with the same
/// credentials may each create a session.
///
/// # Example
///
/// ```ignore
/// let establisher = SessionEstablisher::new(backend);
/// let session = establisher
///     .establish(&Credentials::new("jane@example.com", "hunter22"))
///     .await?;
/// ```
pub struct SessionEstablisher {
    backend: Arc<dyn RemoteBackend>,
    policy: RetryPolicy,
    classifier: Arc<dyn TransientErrorPolicy>,
}

impl SessionEstablisher {
    /// Establisher with the default policy (3 attempts, 2 s apart) and
    /// [`RateLimitPolicy`] classification.
    pub fn new(backend: Arc<dyn RemoteBackend>) -> Self {
        Self::with_policy(backend, RetryPolicy::default())
    }

    pub fn with_policy(backend: Arc<dyn RemoteBackend>, policy: RetryPolicy) -> Self {
        Self {
            backend,
            policy,
            classifier: Arc::new(RateLimitPolicy),
        }
    }

    /// Replace the transient-error classification.
    pub fn with_classifier(mut self, classifier: Arc<dyn TransientErrorPolicy>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Create a session, retrying transient failures with a fixed delay.
    ///
    /// Makes at most `max_attempts` calls to
    /// [`RemoteBackend::create_session`]. The delay follows every transient
    /// failure, including the last one.
    ///
    /// # Errors
    ///
    /// - [`AuthError::PermanentFailure`] with the remote message as soon as
    ///   an attempt fails non-transiently
    /// - [`AuthError::ExhaustedRetries`] when every attempt was transient
    #[instrument(
        skip(self, credentials),
        fields(identifier = %redact_if_sensitive("identifier", &credentials.identifier))
    )]
    pub async fn establish(&self, credentials: &Credentials) -> Result<Session> {
        let max_attempts = self.policy.max_attempts();
        let delay = self.policy.inter_attempt_delay();
        let mut attempt = 0;

        while attempt < max_attempts {
            let result = self
                .backend
                .create_session(&credentials.identifier, &credentials.secret)
                .await;

            match self.classify(result) {
                AttemptOutcome::Success(session) => {
                    debug!(attempt = attempt + 1, "Session established");
                    return Ok(session);
                }
                AttemptOutcome::TransientFailure(reason) => {
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        reason = %reason,
                        "Session attempt failed transiently, delaying before retry"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                AttemptOutcome::PermanentFailure(reason) => {
                    debug!(attempt = attempt + 1, reason = %reason, "Session attempt failed");
                    return Err(AuthError::PermanentFailure(reason));
                }
            }
        }

        Err(AuthError::ExhaustedRetries {
            attempts: max_attempts,
        })
    }

    fn classify(&self, result: BridgeResult<Session>) -> AttemptOutcome {
        match result {
            Ok(session) => AttemptOutcome::Success(session),
            Err(error) if self.classifier.is_transient(&error) => {
                AttemptOutcome::TransientFailure(error.message())
            }
            Err(error) => AttemptOutcome::PermanentFailure(error.message()),
        }
    }
}
