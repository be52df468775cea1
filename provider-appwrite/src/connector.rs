//! Appwrite REST connector
//!
//! Implements the `RemoteBackend` trait for the Appwrite client API.

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result};
use bridge_traits::http::{
    HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm, TransportRetryPolicy,
};
use bridge_traits::{
    AccountHandle, CollectionRef, Document, FileHandle, FilePreview, Query, RemoteBackend,
    Session, CURRENT_SESSION,
};
use bytes::Bytes;
use core_async::sync::RwLock;
use core_async::time::Duration;
use core_runtime::config::BackendConfig;
use core_runtime::logging::{redact_if_sensitive, strip_path};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppwriteError, Result as AppwriteResult};
use crate::query::query_string;
use crate::types::{
    AccountResponse, CreateAccountRequest, CreateDocumentRequest, CreateSessionRequest,
    DocumentListResponse, DocumentResponse, ErrorResponse, FileResponse, SessionResponse,
};

/// Uploads larger than this are sent in chunks of this size.
pub const CHUNK_SIZE: usize = 5 * 1024 * 1024;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const RESPONSE_FORMAT_HEADER: &str = "X-Appwrite-Response-Format";
const RESPONSE_FORMAT: &str = "1.5.0";
const FALLBACK_COOKIES_HEADER: &str = "X-Fallback-Cookies";
const UPLOAD_ID_HEADER: &str = "x-appwrite-id";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Appwrite API connector
///
/// # Features
///
/// - Project and platform identification on every request
/// - Session continuity through the `X-Fallback-Cookies` header
/// - Chunked uploads for files larger than [`CHUNK_SIZE`]
/// - Reads (`GET`) go through the transport retry policy; writes, session
///   creation included, are single exchanges so callers own their retry
///   budget
///
/// # Example
///
/// ```ignore
/// use provider_appwrite::AppwriteConnector;
/// use bridge_traits::RemoteBackend;
///
/// let connector = AppwriteConnector::new(http_client, backend_config);
/// let session = connector.create_session("jane@example.com", "hunter22").await?;
/// ```
pub struct AppwriteConnector {
    http_client: Arc<dyn HttpClient>,
    config: BackendConfig,
    /// Session cookies echoed back by the server, resent on every request
    fallback_cookies: RwLock<Option<String>>,
}

impl AppwriteConnector {
    pub fn new(http_client: Arc<dyn HttpClient>, config: BackendConfig) -> Self {
        Self {
            http_client,
            config,
            fallback_cookies: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Whether the server has handed out session cookies.
    pub async fn has_session_cookies(&self) -> bool {
        self.fallback_cookies.read().await.is_some()
    }

    /// `Origin` value identifying the registered platform, e.g.
    /// `appwrite-android://co.example.app`.
    fn origin(&self) -> String {
        format!(
            "appwrite-{}://{}",
            self.config.platform_kind.as_str(),
            self.config.platform
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint, path)
    }

    /// Base request with project, platform and session headers.
    async fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let mut request = HttpRequest::new(method, self.url(path))
            .header(PROJECT_HEADER, self.config.project_id.as_str())
            .header("Origin", self.origin())
            .header(RESPONSE_FORMAT_HEADER, RESPONSE_FORMAT)
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        if let Some(cookies) = self.fallback_cookies.read().await.as_ref() {
            request = request.header(FALLBACK_COOKIES_HEADER, cookies.as_str());
        }

        request
    }

    /// Execute a request; non-2xx responses become [`AppwriteError::Api`].
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> AppwriteResult<HttpResponse> {
        let response = if request.method == HttpMethod::Get {
            self.http_client
                .execute_with_retry(request, TransportRetryPolicy::default())
                .await?
        } else {
            self.http_client.execute(request).await?
        };

        if let Some(cookies) = response.header(FALLBACK_COOKIES_HEADER) {
            debug!(
                cookies = %redact_if_sensitive("cookie", cookies),
                "Storing session cookies"
            );
            *self.fallback_cookies.write().await = Some(cookies.to_string());
        }

        if response.is_success() {
            debug!(status = response.status, "Appwrite request succeeded");
            return Ok(response);
        }

        let error = match response.json::<ErrorResponse>() {
            Ok(body) => AppwriteError::Api {
                status: response.status,
                kind: body.kind,
                message: body.message,
            },
            Err(_) => AppwriteError::Api {
                status: response.status,
                kind: None,
                message: response
                    .text()
                    .ok()
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| format!("Request failed with status {}", response.status)),
            },
        };

        warn!(status = response.status, error = %error, "Appwrite request failed");
        Err(error)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> AppwriteResult<T> {
        let response = self.send(request).await?;
        serde_json::from_slice(&response.body).map_err(|e| AppwriteError::Parse(e.to_string()))
    }

    fn documents_path(collection: &CollectionRef) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            collection.database_id, collection.collection_id
        )
    }

    fn files_path(&self) -> String {
        format!("/storage/buckets/{}/files", self.config.storage_id)
    }

    fn unique_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    async fn upload_single(
        &self,
        file_id: &str,
        bytes: Bytes,
        file_name: &str,
        mime_type: &str,
    ) -> AppwriteResult<FileResponse> {
        let form = MultipartForm::new()
            .text("fileId", file_id)
            .file("file", file_name, mime_type, bytes);

        let request = self
            .request(HttpMethod::Post, &self.files_path())
            .await
            .multipart(form)
            .timeout(UPLOAD_TIMEOUT);

        self.send_json(request).await
    }

    /// Upload in [`CHUNK_SIZE`] pieces. The first response assigns the
    /// file id every later chunk must carry.
    async fn upload_chunked(
        &self,
        file_id: &str,
        bytes: Bytes,
        file_name: &str,
        mime_type: &str,
    ) -> AppwriteResult<FileResponse> {
        let total = bytes.len();
        let mut uploaded_id: Option<String> = None;
        let mut last_response: Option<FileResponse> = None;

        for start in (0..total).step_by(CHUNK_SIZE) {
            let end = (start + CHUNK_SIZE).min(total);
            let form = MultipartForm::new().text("fileId", file_id).file(
                "file",
                file_name,
                mime_type,
                bytes.slice(start..end),
            );

            let mut request = self
                .request(HttpMethod::Post, &self.files_path())
                .await
                .header("Content-Range", format!("bytes {}-{}/{}", start, end - 1, total))
                .multipart(form)
                .timeout(UPLOAD_TIMEOUT);

            if let Some(id) = &uploaded_id {
                request = request.header(UPLOAD_ID_HEADER, id.as_str());
            }

            let response: FileResponse = self.send_json(request).await?;
            debug!(
                chunk = response.chunks_uploaded,
                chunks = response.chunks_total,
                "Uploaded chunk"
            );
            uploaded_id = Some(response.id.clone());
            last_response = Some(response);
        }

        last_response
            .ok_or_else(|| AppwriteError::InvalidRequest("Cannot upload an empty file".to_string()))
    }

    fn require_file_id(file_id: &str) -> Result<()> {
        if file_id.trim().is_empty() {
            return Err(BridgeError::OperationFailed(
                "File id is required to resolve a file URL".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteBackend for AppwriteConnector {
    #[instrument(skip(self, identifier, secret), fields(email = %redact_if_sensitive("email", identifier)))]
    async fn create_account(
        &self,
        identifier: &str,
        secret: &str,
        display_name: &str,
    ) -> Result<AccountHandle> {
        let user_id = Self::unique_id();
        let request = self
            .request(HttpMethod::Post, "/account")
            .await
            .json(&CreateAccountRequest {
                user_id: &user_id,
                email: identifier,
                password: secret,
                name: display_name,
            })?;

        let account: AccountResponse = self.send_json(request).await?;
        info!(account_id = %account.id, "Account created");
        Ok(account.into())
    }

    #[instrument(skip(self, identifier, secret), fields(email = %redact_if_sensitive("email", identifier)))]
    async fn create_session(&self, identifier: &str, secret: &str) -> Result<Session> {
        let request = self
            .request(HttpMethod::Post, "/account/sessions/email")
            .await
            .json(&CreateSessionRequest {
                email: identifier,
                password: secret,
            })?;

        let session: SessionResponse = self.send_json(request).await?;
        debug!(session_id = %session.id, "Session created");
        Ok(session.into())
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, session_ref: &str) -> Result<()> {
        let path = format!("/account/sessions/{}", urlencoding::encode(session_ref));
        let request = self.request(HttpMethod::Delete, &path).await;
        self.send(request).await?;

        if session_ref == CURRENT_SESSION {
            *self.fallback_cookies.write().await = None;
        }

        info!("Session deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_current_account(&self) -> Result<AccountHandle> {
        let request = self.request(HttpMethod::Get, "/account").await;
        let account: AccountResponse = self.send_json(request).await?;
        Ok(account.into())
    }

    #[instrument(skip(self, filters), fields(collection = %collection.collection_id, filters = filters.len()))]
    async fn list_documents(
        &self,
        collection: &CollectionRef,
        filters: &[Query],
    ) -> Result<Vec<Document>> {
        let mut path = Self::documents_path(collection);
        if !filters.is_empty() {
            path = format!("{}?{}", path, query_string(filters));
        }

        let request = self.request(HttpMethod::Get, &path).await;
        let list: DocumentListResponse = self.send_json(request).await?;

        debug!(total = list.total, returned = list.documents.len(), "Listed documents");
        Ok(list.documents.into_iter().map(Document::from).collect())
    }

    #[instrument(skip(self, data), fields(collection = %collection.collection_id))]
    async fn create_document(
        &self,
        collection: &CollectionRef,
        id: &str,
        data: Map<String, Value>,
    ) -> Result<Document> {
        let request = self
            .request(HttpMethod::Post, &Self::documents_path(collection))
            .await
            .json(&CreateDocumentRequest {
                document_id: id,
                data: &data,
            })?;

        let document: DocumentResponse = self.send_json(request).await?;
        Ok(document.into())
    }

    #[instrument(skip(self, bytes), fields(file = %strip_path(file_name), size = bytes.len()))]
    async fn upload_file(
        &self,
        bytes: Bytes,
        file_name: &str,
        mime_type: &str,
    ) -> Result<FileHandle> {
        let file_id = Self::unique_id();
        let file_name = strip_path(file_name);

        let file = if bytes.len() <= CHUNK_SIZE {
            self.upload_single(&file_id, bytes, file_name, mime_type).await?
        } else {
            self.upload_chunked(&file_id, bytes, file_name, mime_type).await?
        };

        info!(file_id = %file.id, "File uploaded");
        Ok(file.into())
    }

    fn get_file_preview(&self, file_id: &str, preview: FilePreview) -> Result<String> {
        Self::require_file_id(file_id)?;

        let base = self.url(&format!(
            "{}/{}",
            self.files_path(),
            urlencoding::encode(file_id)
        ));
        let project = urlencoding::encode(&self.config.project_id);

        Ok(match preview {
            FilePreview::View => format!("{}/view?project={}", base, project),
            FilePreview::Image {
                width,
                height,
                gravity,
                quality,
            } => format!(
                "{}/preview?width={}&height={}&gravity={}&quality={}&project={}",
                base,
                width,
                height,
                gravity.as_str(),
                quality,
                project
            ),
        })
    }

    fn avatar_initials(&self, name: &str) -> Result<String> {
        Ok(format!(
            "{}?name={}&project={}",
            self.url("/avatars/initials"),
            urlencoding::encode(name),
            urlencoding::encode(&self.config.project_id)
        ))
    }
}
