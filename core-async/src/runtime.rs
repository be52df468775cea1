//! Runtime utilities that abstract over the underlying async executor.
//!
//! Downstream crates call [`block_on`] from synchronous code (tests, FFI
//! shims, logging sinks) without ever constructing a Tokio runtime themselves.

pub use tokio::runtime::{Builder, Handle, Runtime};

/// Runs the provided future to completion on a fresh current-thread runtime.
///
/// # Panics
///
/// Panics if the runtime cannot be built, which only happens when the OS
/// refuses to hand out the timer or I/O driver.
pub fn block_on<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("core_async::runtime::block_on: failed to build Tokio runtime")
        .block_on(future)
}
