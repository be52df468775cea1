//! Appwrite API request and response types
//!
//! See: https://appwrite.io/docs/references/cloud/client-rest

use bridge_traits::{AccountHandle, Document, FileHandle, Session};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error body returned with every non-2xx response
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub message: String,

    #[serde(default)]
    pub code: u16,

    /// Machine-readable error type, e.g. `user_invalid_credentials`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// `POST /account`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest<'a> {
    pub user_id: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

/// `POST /account/sessions/email`
#[derive(Debug, Serialize)]
pub struct CreateSessionRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /databases/{databaseId}/collections/{collectionId}/documents`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest<'a> {
    pub document_id: &'a str,
    pub data: &'a Map<String, Value>,
}

/// Account resource
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    #[serde(rename = "$id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,
}

impl From<AccountResponse> for AccountHandle {
    fn from(account: AccountResponse) -> Self {
        AccountHandle {
            id: account.id,
            email: account.email,
            name: account.name,
        }
    }
}

/// Session resource
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(rename = "$id")]
    pub id: String,

    pub user_id: String,

    /// Expiry (ISO 8601)
    #[serde(default)]
    pub expire: Option<String>,

    #[serde(default)]
    pub current: bool,
}

impl From<SessionResponse> for Session {
    fn from(session: SessionResponse) -> Self {
        Session {
            id: session.id,
            user_id: session.user_id,
            expire: session.expire.as_deref().and_then(parse_timestamp),
            current: session.current,
        }
    }
}

/// Document resource: system attributes plus the user's fields
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentResponse {
    #[serde(rename = "$id")]
    pub id: String,

    #[serde(rename = "$collectionId", default)]
    pub collection_id: String,

    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<String>,

    #[serde(rename = "$updatedAt", default)]
    pub updated_at: Option<String>,

    /// Everything else, including remaining `$`-prefixed system attributes
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl From<DocumentResponse> for Document {
    fn from(document: DocumentResponse) -> Self {
        let fields = document
            .fields
            .into_iter()
            .filter(|(key, _)| !key.starts_with('$'))
            .collect();

        Document {
            id: document.id,
            collection_id: document.collection_id,
            created_at: document.created_at.as_deref().and_then(parse_timestamp),
            updated_at: document.updated_at.as_deref().and_then(parse_timestamp),
            fields,
        }
    }
}

/// Documents list response
#[derive(Debug, Deserialize)]
pub struct DocumentListResponse {
    #[serde(default)]
    pub total: u64,

    pub documents: Vec<DocumentResponse>,
}

/// Storage file resource
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    #[serde(rename = "$id")]
    pub id: String,

    pub bucket_id: String,

    pub name: String,

    pub mime_type: String,

    /// Original size in bytes
    #[serde(default)]
    pub size_original: u64,

    #[serde(default)]
    pub chunks_total: u32,

    #[serde(default)]
    pub chunks_uploaded: u32,
}

impl From<FileResponse> for FileHandle {
    fn from(file: FileResponse) -> Self {
        FileHandle {
            id: file.id,
            bucket_id: file.bucket_id,
            name: file.name,
            mime_type: file.mime_type,
            size: file.size_original,
        }
    }
}

/// Parse an ISO 8601 timestamp; empty or malformed values yield `None`.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
