//! # Appwrite Provider
//!
//! Implements `RemoteBackend` on top of the Appwrite REST API.
//!
//! ## Overview
//!
//! This module provides:
//! - Email/password accounts and sessions, with session continuity through
//!   the `X-Fallback-Cookies` header
//! - Document listing and creation with Appwrite query encoding
//! - Storage uploads, chunked above 5 MiB
//! - View, preview and avatar URL resolution without a network round-trip
//!
//! Every request goes through the injected `HttpClient`, exactly once.

pub mod connector;
pub mod error;
pub mod query;
pub mod types;

pub use connector::{AppwriteConnector, CHUNK_SIZE};
pub use error::{AppwriteError, Result};
