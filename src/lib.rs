//! Workspace umbrella crate.
//!
//! Exposes feature flags that map onto the individual workspace crates so a
//! host application can depend on `plattea-workspace` alone. With
//! `desktop-shims` (default) or `core-only`, the service façade is
//! re-exported as [`core`].

#[cfg(any(feature = "desktop-shims", feature = "core-only"))]
pub use core_service as core;
