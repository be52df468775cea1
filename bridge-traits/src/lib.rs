//! # Host Bridge Traits
//!
//! Contracts between the Plattea core and the outside world.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - single-shot async HTTP, with opt-in transport retries
//! - [`RemoteBackend`](backend::RemoteBackend) - the hosted identity, database and storage service
//! - [`LoggerSink`](logging::LoggerSink) - forward structured logs to host logging
//!
//! ## Implementations
//!
//! | Trait | Implementation |
//! |-------|----------------|
//! | `HttpClient` | `bridge-desktop::ReqwestHttpClient` |
//! | `RemoteBackend` | `provider-appwrite::AppwriteConnector` |
//! | `LoggerSink` | [`ConsoleLogger`](logging::ConsoleLogger), or a host adapter |
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Errors reported
//! by the backend itself travel as `BridgeError::Remote`, whose display is
//! the backend's own message.
//!
//! ## Thread Safety
//!
//! Every trait requires `Send + Sync` so one instance can be shared behind an
//! `Arc` across concurrent calls.

pub mod backend;
pub mod error;
pub mod http;
pub mod logging;

pub use error::BridgeError;

pub use backend::{
    AccountHandle, CollectionRef, Document, FileHandle, FilePreview, Gravity, Query,
    RemoteBackend, Session, CURRENT_SESSION,
};
pub use http::{
    HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm, MultipartPart,
    TransportRetryPolicy,
};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
