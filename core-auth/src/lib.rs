//! # Authentication Module
//!
//! Session establishment and account lifecycle against the hosted identity
//! service.
//!
//! ## Overview
//!
//! - [`SessionEstablisher`] turns credentials into a [`Session`](bridge_traits::Session),
//!   retrying rate-limited attempts with a fixed delay
//! - [`RetryPolicy`] and [`TransientErrorPolicy`] configure how often and on
//!   which failures it retries
//! - [`AccountManager`] covers sign-up, sign-in, sign-out and current-user
//!   lookup
//!
//! The backend is always injected as an `Arc<dyn RemoteBackend>`; nothing in
//! this crate holds process-wide state.

pub mod account;
pub mod error;
pub mod establisher;
pub mod retry;
pub mod types;

pub use account::AccountManager;
pub use error::{AuthError, Result};
pub use establisher::SessionEstablisher;
pub use retry::{RateLimitPolicy, RetryPolicy, TransientErrorPolicy};
pub use types::{AttemptOutcome, Credentials, UserProfile};
