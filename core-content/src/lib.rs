//! # Content Module
//!
//! Video posts on top of the hosted document database and file storage:
//! media upload with URL resolution, post creation, and the listing
//! queries used by the app's feeds.
//!
//! Identifiers typed by users are normalized with [`sanitize_identifier`]
//! before they key any document.

pub mod error;
pub mod models;
pub mod sanitize;
pub mod service;

pub use error::{ContentError, Result};
pub use models::{MediaAsset, MediaKind, NewVideoPost, VideoPost};
pub use sanitize::sanitize_identifier;
pub use service::{VideoLibrary, LATEST_POSTS_LIMIT};
