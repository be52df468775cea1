mod common;

use std::sync::Arc;

use bridge_traits::BridgeError;
use common::{session, ScriptedBackend, INVALID_CREDENTIALS, RATE_LIMITED};
use core_async::time::{Duration, Instant};
use core_auth::{AuthError, Credentials, RetryPolicy, SessionEstablisher, TransientErrorPolicy};

const DELAY: Duration = Duration::from_millis(2000);

fn credentials() -> Credentials {
    Credentials::new("jane@example.com", "hunter22")
}

fn rate_limited() -> Result<bridge_traits::Session, BridgeError> {
    Err(BridgeError::remote(RATE_LIMITED))
}

fn establisher(backend: &Arc<ScriptedBackend>) -> SessionEstablisher {
    SessionEstablisher::new(backend.clone())
}

#[tokio::test(start_paused = true)]
async fn immediate_success_makes_one_call_without_delay() {
    let backend = Arc::new(ScriptedBackend::new().with_sessions(vec![Ok(session("s1"))]));
    let start = Instant::now();

    let result = establisher(&backend).establish(&credentials()).await.unwrap();

    assert_eq!(result, session("s1"));
    assert_eq!(backend.session_calls(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn one_transient_failure_then_success() {
    let backend = Arc::new(
        ScriptedBackend::new().with_sessions(vec![rate_limited(), Ok(session("s2"))]),
    );
    let start = Instant::now();

    let result = establisher(&backend).establish(&credentials()).await.unwrap();

    assert_eq!(result.id, "s2");
    assert_eq!(backend.session_calls(), 2);
    assert_eq!(start.elapsed(), DELAY);
}

#[tokio::test(start_paused = true)]
async fn two_transient_failures_then_success() {
    let backend = Arc::new(ScriptedBackend::new().with_sessions(vec![
        rate_limited(),
        rate_limited(),
        Ok(session("s3")),
    ]));
    let start = Instant::now();

    let result = establisher(&backend).establish(&credentials()).await.unwrap();

    assert_eq!(result.id, "s3");
    assert_eq!(backend.session_calls(), 3);
    assert_eq!(start.elapsed(), DELAY * 2);
}

#[tokio::test(start_paused = true)]
async fn three_transient_failures_exhaust_retries() {
    let backend = Arc::new(ScriptedBackend::new().with_sessions(vec![
        rate_limited(),
        rate_limited(),
        rate_limited(),
        Ok(session("never")),
    ]));
    let start = Instant::now();

    let err = establisher(&backend)
        .establish(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::ExhaustedRetries { attempts: 3 }));
    assert_eq!(backend.session_calls(), 3);
    assert_eq!(start.elapsed(), DELAY * 3);
}

#[tokio::test(start_paused = true)]
async fn permanent_failure_is_surfaced_immediately() {
    let backend = Arc::new(ScriptedBackend::new().with_sessions(vec![
        Err(BridgeError::remote(INVALID_CREDENTIALS)),
        Ok(session("never")),
    ]));
    let start = Instant::now();

    let err = establisher(&backend)
        .establish(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(&err, AuthError::PermanentFailure(msg) if msg == INVALID_CREDENTIALS));
    assert_eq!(err.message(), INVALID_CREDENTIALS);
    assert_eq!(backend.session_calls(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn permanent_failure_after_transient_stops_retrying() {
    let backend = Arc::new(ScriptedBackend::new().with_sessions(vec![
        rate_limited(),
        Err(BridgeError::remote(INVALID_CREDENTIALS)),
        Ok(session("never")),
    ]));
    let start = Instant::now();

    let err = establisher(&backend)
        .establish(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::PermanentFailure(_)));
    assert_eq!(backend.session_calls(), 2);
    assert_eq!(start.elapsed(), DELAY);
}

#[tokio::test(start_paused = true)]
async fn capitalised_rate_limit_is_not_retried() {
    let backend = Arc::new(ScriptedBackend::new().with_sessions(vec![
        Err(BridgeError::remote("Rate limit for the current endpoint has been exceeded.")),
        Ok(session("never")),
    ]));

    let err = establisher(&backend)
        .establish(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::PermanentFailure(_)));
    assert_eq!(backend.session_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn custom_policy_controls_attempts_and_delay() {
    let backend = Arc::new(ScriptedBackend::new().with_sessions(vec![
        rate_limited(),
        rate_limited(),
        rate_limited(),
        rate_limited(),
        Ok(session("s5")),
    ]));
    let policy = RetryPolicy::new(5, Duration::from_millis(500)).unwrap();
    let start = Instant::now();

    let result = SessionEstablisher::with_policy(backend.clone(), policy)
        .establish(&credentials())
        .await
        .unwrap();

    assert_eq!(result.id, "s5");
    assert_eq!(backend.session_calls(), 5);
    assert_eq!(start.elapsed(), Duration::from_millis(2000));
}

struct TimeoutsAreTransient;

impl TransientErrorPolicy for TimeoutsAreTransient {
    fn is_transient(&self, error: &BridgeError) -> bool {
        error.to_string().contains("timed out")
    }
}

#[tokio::test(start_paused = true)]
async fn classifier_can_be_replaced() {
    let backend = Arc::new(ScriptedBackend::new().with_sessions(vec![
        Err(BridgeError::OperationFailed("Request timed out".to_string())),
        Ok(session("s6")),
    ]));

    let result = establisher(&backend)
        .with_classifier(Arc::new(TimeoutsAreTransient))
        .establish(&credentials())
        .await
        .unwrap();

    assert_eq!(result.id, "s6");
    assert_eq!(backend.session_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn concurrent_invocations_are_independent() {
    let backend = Arc::new(ScriptedBackend::new().with_sessions(vec![
        Ok(session("a")),
        Ok(session("b")),
    ]));
    let establisher = establisher(&backend);
    let (first_credentials, second_credentials) = (credentials(), credentials());

    let (first, second) = tokio::join!(
        establisher.establish(&first_credentials),
        establisher.establish(&second_credentials)
    );

    let mut ids = vec![first.unwrap().id, second.unwrap().id];
    ids.sort();
    assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(backend.session_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn transport_failure_surfaces_bare_message() {
    let backend = Arc::new(ScriptedBackend::new().with_sessions(vec![Err(
        BridgeError::OperationFailed("Request timed out".to_string()),
    )]));
    let start = Instant::now();

    let err = establisher(&backend)
        .establish(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::PermanentFailure(_)));
    assert_eq!(err.message(), "Request timed out");
    assert_eq!(backend.session_calls(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}
