//! Retry policy and transient-error classification for session creation.

use bridge_traits::BridgeError;
use core_async::time::Duration;

use crate::error::{AuthError, Result};

/// Default number of session-creation attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default fixed pause after a transient failure.
pub const DEFAULT_INTER_ATTEMPT_DELAY: Duration = Duration::from_millis(2000);

/// How often and how far apart session creation is attempted.
///
/// Immutable once built. The delay is fixed: no exponential growth, no
/// jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    inter_attempt_delay: Duration,
}

impl RetryPolicy {
    /// # Errors
    ///
    /// [`AuthError::InvalidRetryPolicy`] if `max_attempts` is zero.
    pub fn new(max_attempts: u32, inter_attempt_delay: Duration) -> Result<Self> {
        if max_attempts == 0 {
            return Err(AuthError::InvalidRetryPolicy(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            max_attempts,
            inter_attempt_delay,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn inter_attempt_delay(&self) -> Duration {
        self.inter_attempt_delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            inter_attempt_delay: DEFAULT_INTER_ATTEMPT_DELAY,
        }
    }
}

/// Decides whether a failed session attempt is worth retrying.
pub trait TransientErrorPolicy: Send + Sync {
    fn is_transient(&self, error: &BridgeError) -> bool;
}

/// Treats rate limiting as the only transient failure.
///
/// Matches the literal token [`RateLimitPolicy::TOKEN`] anywhere in the error
/// message, case-sensitively. Network timeouts and every other failure are
/// permanent. Messages phrased as "Rate limit ..." (capital R) do not match.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimitPolicy;

impl RateLimitPolicy {
    pub const TOKEN: &'static str = "rate limit";
}

impl TransientErrorPolicy for RateLimitPolicy {
    fn is_transient(&self, error: &BridgeError) -> bool {
        error.to_string().contains(Self::TOKEN)
    }
}
