//! Async runtime abstraction layer for the Plattea client core.
//!
//! Every `core-*`, `bridge-*` and `provider-*` crate goes through this crate
//! for sleeping, spawning and locking instead of naming Tokio directly, so the
//! executor can be swapped in one place.
//!
//! # Modules
//!
//! - `task`: task spawning and joining
//! - `time`: `sleep`, `timeout`, `Duration`, `Instant`
//! - `sync`: async-aware `Mutex`/`RwLock` and channels
//! - `runtime`: `block_on` for synchronous entry points
//!
//! # Examples
//!
//! ```rust
//! use core_async::task;
//! use core_async::time::{sleep, Duration};
//!
//! async fn example() {
//!     let handle = task::spawn(async {
//!         sleep(Duration::from_millis(10)).await;
//!         42
//!     });
//!     assert_eq!(handle.await.unwrap(), 42);
//! }
//! ```

// Async entry-point/test macros, so downstream crates never need a direct
// Tokio dependency just to write `async fn main` or async tests.
pub use core_async_macros::{main, test};

pub mod runtime;
pub mod sync;
pub mod task;
pub mod time;

pub use task::spawn;
pub use time::{sleep, Duration, Instant};
