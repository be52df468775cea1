//! # Core Runtime Module
//!
//! Foundational runtime infrastructure shared by the Plattea core crates:
//! - Logging and tracing setup
//! - Backend and core configuration with startup validation
//!
//! Host capabilities (HTTP) are injected through [`config::CoreConfig`];
//! with the `desktop-shims` feature a reqwest-backed client is used when
//! none is supplied.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
