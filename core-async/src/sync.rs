//! Synchronization primitives.
//!
//! Async-aware locks and channels backed by `tokio::sync`. Guards may be held
//! across `.await` points without blocking the executor.
//!
//! ```rust
//! use core_async::sync::RwLock;
//!
//! async fn example() {
//!     let cookie = RwLock::new(None::<String>);
//!     *cookie.write().await = Some("a_session=abc".to_string());
//!     assert!(cookie.read().await.is_some());
//! }
//! ```

pub use tokio::sync::{mpsc, oneshot, Mutex, MutexGuard, Notify, RwLock, RwLockReadGuard,
    RwLockWriteGuard, Semaphore};
