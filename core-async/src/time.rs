//! Time-related abstractions.
//!
//! `sleep` integrates with Tokio's timer wheel, which also means tests can
//! run with a paused clock (`tokio::time::pause`) and observe exact delays
//! without waiting for them.
//!
//! ```rust
//! use core_async::time::{sleep, Duration, Instant};
//!
//! async fn example() {
//!     let start = Instant::now();
//!     sleep(Duration::from_millis(5)).await;
//!     assert!(start.elapsed() >= Duration::from_millis(5));
//! }
//! ```

pub use tokio::time::{interval, sleep, sleep_until, timeout, Instant, Interval, Sleep, Timeout};

pub use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Returns the current time as milliseconds since `UNIX_EPOCH`.
///
/// Clocks set before the epoch report `0`.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
