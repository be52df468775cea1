//! # Core Configuration Module
//!
//! Configuration for the Plattea client core.
//!
//! ## Overview
//!
//! Two layers, both built through validating builders:
//!
//! - [`BackendConfig`] names the hosted backend project: endpoint, project
//!   and platform identifiers, and the database, collection and bucket ids
//!   the data layer reads and writes.
//! - [`CoreConfig`] bundles a `BackendConfig` with the injected bridges.
//!
//! ## Optional Dependencies (with platform defaults)
//!
//! - `HttpClient` - HTTP operations (desktop default: reqwest)
//!
//! When the `desktop-shims` feature is enabled, the reqwest client from
//! `bridge-desktop` is injected automatically if none is provided. Without
//! it, building fails with [`Error::CapabilityMissing`].
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::{BackendConfig, CoreConfig};
//!
//! let backend = BackendConfig::builder()
//!     .project_id("66e34e690029213c5f9d")
//!     .platform("co.edu.sena.soy.plattea")
//!     .database_id("66e3518b002f261f4923")
//!     .user_collection_id("66e351e2001332958d40")
//!     .video_collection_id("66e3521b0009801951a5")
//!     .storage_id("66e3563d00116767943c")
//!     .build()?;
//!
//! let config = CoreConfig::builder().backend(backend).build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{CollectionRef, HttpClient};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Public Appwrite Cloud endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

/// Maximum length of a backend identifier (project, database, collection, bucket).
const MAX_ID_LEN: usize = 36;

/// Mobile platform the client registers as.
///
/// The backend only accepts requests whose origin matches a platform
/// registered on the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformKind {
    #[default]
    Android,
    Ios,
}

impl PlatformKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformKind::Android => "android",
            PlatformKind::Ios => "ios",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hosted backend project settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// API endpoint, without trailing slash (e.g. `https://cloud.appwrite.io/v1`)
    pub endpoint: String,
    pub project_id: String,
    /// Application identifier registered as a platform on the project
    pub platform: String,
    pub platform_kind: PlatformKind,
    pub database_id: String,
    /// Collection holding one profile document per account
    pub user_collection_id: String,
    /// Collection holding video posts
    pub video_collection_id: String,
    /// Storage bucket for thumbnails and videos
    pub storage_id: String,
}

impl BackendConfig {
    pub fn builder() -> BackendConfigBuilder {
        BackendConfigBuilder::default()
    }

    /// Collection of user-profile documents.
    pub fn users(&self) -> CollectionRef {
        CollectionRef::new(&self.database_id, &self.user_collection_id)
    }

    /// Collection of video-post documents.
    pub fn videos(&self) -> CollectionRef {
        CollectionRef::new(&self.database_id, &self.video_collection_id)
    }

    /// Validates every field and returns an actionable error on the first
    /// problem found.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            Error::Config(format!("Invalid backend endpoint '{}': {}", self.endpoint, e))
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(Error::Config(format!(
                "Backend endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.platform.trim().is_empty() {
            return Err(Error::Config(
                "Platform identifier cannot be empty. Use .platform() to set the \
                 application id registered on the backend project."
                    .to_string(),
            ));
        }

        for (name, value) in [
            ("project_id", &self.project_id),
            ("database_id", &self.database_id),
            ("user_collection_id", &self.user_collection_id),
            ("video_collection_id", &self.video_collection_id),
            ("storage_id", &self.storage_id),
        ] {
            validate_id(name, value)?;
        }

        Ok(())
    }
}

fn validate_id(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Config(format!(
            "{} is required. Use .{}() to set it.",
            name, name
        )));
    }

    if value.len() > MAX_ID_LEN {
        return Err(Error::Config(format!(
            "{} exceeds {} characters",
            name, MAX_ID_LEN
        )));
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
    {
        return Err(Error::Config(format!(
            "{} may only contain a-z, A-Z, 0-9, '.', '-' and '_'",
            name
        )));
    }

    Ok(())
}

/// Builder for [`BackendConfig`].
#[derive(Debug, Default)]
pub struct BackendConfigBuilder {
    endpoint: Option<String>,
    project_id: Option<String>,
    platform: Option<String>,
    platform_kind: PlatformKind,
    database_id: Option<String>,
    user_collection_id: Option<String>,
    video_collection_id: Option<String>,
    storage_id: Option<String>,
}

impl BackendConfigBuilder {
    /// Sets the API endpoint. Default: [`DEFAULT_ENDPOINT`].
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn project_id(mut self, id: impl Into<String>) -> Self {
        self.project_id = Some(id.into());
        self
    }

    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Default: [`PlatformKind::Android`]
    pub fn platform_kind(mut self, kind: PlatformKind) -> Self {
        self.platform_kind = kind;
        self
    }

    pub fn database_id(mut self, id: impl Into<String>) -> Self {
        self.database_id = Some(id.into());
        self
    }

    pub fn user_collection_id(mut self, id: impl Into<String>) -> Self {
        self.user_collection_id = Some(id.into());
        self
    }

    pub fn video_collection_id(mut self, id: impl Into<String>) -> Self {
        self.video_collection_id = Some(id.into());
        self
    }

    pub fn storage_id(mut self, id: impl Into<String>) -> Self {
        self.storage_id = Some(id.into());
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<BackendConfig> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        let config = BackendConfig {
            endpoint,
            project_id: self.project_id.unwrap_or_default(),
            platform: self.platform.unwrap_or_default(),
            platform_kind: self.platform_kind,
            database_id: self.database_id.unwrap_or_default(),
            user_collection_id: self.user_collection_id.unwrap_or_default(),
            video_collection_id: self.video_collection_id.unwrap_or_default(),
            storage_id: self.storage_id.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Core configuration: backend settings plus injected bridges.
#[derive(Clone)]
pub struct CoreConfig {
    pub backend: BackendConfig,

    /// HTTP client for backend requests
    pub http_client: Arc<dyn HttpClient>,
}

impl fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreConfig")
            .field("backend", &self.backend)
            .field("http_client", &"HttpClient { ... }")
            .finish()
    }
}

impl CoreConfig {
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }
}

/// Builder for [`CoreConfig`].
#[derive(Default)]
pub struct CoreConfigBuilder {
    backend: Option<BackendConfig>,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl CoreConfigBuilder {
    /// Sets the backend project configuration (required).
    pub fn backend(mut self, backend: BackendConfig) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Sets the HTTP client implementation.
    ///
    /// Optional when the `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the final `CoreConfig`.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the backend config is missing or invalid
    /// - [`Error::CapabilityMissing`] if no HTTP client is available
    pub fn build(self) -> Result<CoreConfig> {
        let backend = self.backend.ok_or_else(|| {
            Error::Config("Backend configuration is required. Use .backend() to set it.".to_string())
        })?;
        backend.validate()?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client()?,
        };

        Ok(CoreConfig {
            backend,
            http_client,
        })
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::new().map_err(|e| Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: e.to_string(),
    })?;
    let client: Arc<dyn HttpClient> = Arc::new(client);
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    Err(Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "No HTTP client implementation provided. \
                 Desktop: enable the 'desktop-shims' feature to use ReqwestHttpClient. \
                 Mobile: inject the platform-native adapter."
            .to_string(),
    })
}
