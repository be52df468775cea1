//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations into the shared
//! Rust core: the configured HTTP client feeds an [`AppwriteConnector`],
//! which backs both the account manager and the video library. Desktop apps
//! typically enable the `desktop-shims` feature so a reqwest client is used
//! when none is injected; mobile hosts inject their platform adapter through
//! [`CoreConfig`].

pub mod error;

pub use error::{CoreError, Result};

pub use core_auth::{AccountManager, Credentials, SessionEstablisher, UserProfile};
pub use core_content::{MediaAsset, MediaKind, NewVideoPost, VideoLibrary, VideoPost};
pub use core_runtime::config::{BackendConfig, CoreConfig, PlatformKind};

use std::sync::Arc;

use bridge_traits::RemoteBackend;
use provider_appwrite::AppwriteConnector;
use tracing::info;

/// Primary façade exposed to host applications.
///
/// Cheap to clone; clones share the same backend and therefore the same
/// session.
#[derive(Clone)]
pub struct CoreService {
    backend: Arc<dyn RemoteBackend>,
    config: BackendConfig,
    accounts: Arc<AccountManager>,
    library: Arc<VideoLibrary>,
}

impl CoreService {
    /// Build the service against Appwrite using the configured HTTP client.
    pub fn new(config: CoreConfig) -> Self {
        let connector = AppwriteConnector::new(config.http_client, config.backend.clone());
        Self::with_backend(Arc::new(connector), config.backend)
    }

    /// Build the service over any backend implementation.
    pub fn with_backend(backend: Arc<dyn RemoteBackend>, config: BackendConfig) -> Self {
        let accounts = AccountManager::new(Arc::clone(&backend), &config);
        let library = VideoLibrary::new(Arc::clone(&backend), &config);

        info!(
            endpoint = %config.endpoint,
            platform = %config.platform,
            platform_kind = %config.platform_kind,
            "Core service initialized"
        );

        Self {
            backend,
            config,
            accounts: Arc::new(accounts),
            library: Arc::new(library),
        }
    }

    pub fn accounts(&self) -> &AccountManager {
        &self.accounts
    }

    pub fn library(&self) -> &VideoLibrary {
        &self.library
    }

    pub fn backend(&self) -> Arc<dyn RemoteBackend> {
        Arc::clone(&self.backend)
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

/// Validate `backend`, resolve the default HTTP client and build the service.
///
/// ```ignore
/// let core = core_service::bootstrap(
///     BackendConfig::builder()
///         .project_id("my-project")
///         .platform("com.example.app")
///         .database_id("db")
///         .user_collection_id("users")
///         .video_collection_id("videos")
///         .storage_id("media")
///         .build()?,
/// )?;
/// let posts = core.library().latest_posts().await?;
/// ```
///
/// # Errors
///
/// [`CoreError::Runtime`] when the configuration is invalid or no HTTP
/// client is available (the `desktop-shims` feature is off).
pub fn bootstrap(backend: BackendConfig) -> Result<CoreService> {
    let config = CoreConfig::builder().backend(backend).build()?;
    Ok(CoreService::new(config))
}
