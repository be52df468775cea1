//! Remote Backend Abstraction
//!
//! The hosted backend-as-a-service (identity, document database, file
//! storage) the core consumes. The core never reimplements it; connectors
//! such as `provider-appwrite` translate these calls to the wire, and tests
//! substitute in-memory doubles.
//!
//! Every write is a single request/response exchange. Retrying a write, and
//! session creation in particular, is the caller's decision.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Session reference that addresses the session the client is currently using.
pub const CURRENT_SESSION: &str = "current";

/// An authenticated session issued by the identity service.
///
/// Opaque to the core: it is returned to the caller and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub expire: Option<DateTime<Utc>>,
    pub current: bool,
}

/// A user account known to the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHandle {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// A database + collection pair addressing a set of documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionRef {
    pub database_id: String,
    pub collection_id: String,
}

impl CollectionRef {
    pub fn new(database_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            database_id: database_id.into(),
            collection_id: collection_id.into(),
        }
    }
}

/// A stored document with its system attributes split out from user fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub collection_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub fields: Map<String, Value>,
}

impl Document {
    /// String value of a user field, if present and a string.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// Filters and modifiers for [`RemoteBackend::list_documents`].
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Attribute equals one of the given values
    Equal { attribute: String, values: Vec<Value> },
    /// Full-text search on an indexed attribute
    Search { attribute: String, value: String },
    OrderAsc(String),
    OrderDesc(String),
    Limit(u32),
}

impl Query {
    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Query::Equal {
            attribute: attribute.into(),
            values: vec![value.into()],
        }
    }

    pub fn search(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Query::Search {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn order_desc(attribute: impl Into<String>) -> Self {
        Query::OrderDesc(attribute.into())
    }

    pub fn order_asc(attribute: impl Into<String>) -> Self {
        Query::OrderAsc(attribute.into())
    }

    pub fn limit(limit: u32) -> Self {
        Query::Limit(limit)
    }
}

/// A file stored in the backend's object storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub id: String,
    pub bucket_id: String,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

/// Crop anchor for image previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gravity {
    #[default]
    Center,
    Top,
    TopLeft,
    TopRight,
    Left,
    Right,
    Bottom,
    BottomLeft,
    BottomRight,
}

impl Gravity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gravity::Center => "center",
            Gravity::Top => "top",
            Gravity::TopLeft => "top-left",
            Gravity::TopRight => "top-right",
            Gravity::Left => "left",
            Gravity::Right => "right",
            Gravity::Bottom => "bottom",
            Gravity::BottomLeft => "bottom-left",
            Gravity::BottomRight => "bottom-right",
        }
    }
}

/// Which URL to resolve for a stored file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePreview {
    /// The raw file, streamed as-is (used for video)
    View,
    /// A server-side rendered image preview
    Image {
        width: u32,
        height: u32,
        gravity: Gravity,
        quality: u8,
    },
}

/// Hosted backend-as-a-service operations consumed by the core.
///
/// Implementations never retry writes: each mutating method is one remote
/// exchange (a large upload may be split into chunk requests). Reads may use
/// transport retries. Backend-side failures are reported as
/// [`BridgeError::Remote`](crate::error::BridgeError::Remote) with the
/// backend's message preserved.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// Register a new account.
    async fn create_account(
        &self,
        identifier: &str,
        secret: &str,
        display_name: &str,
    ) -> Result<AccountHandle>;

    /// Create a session from email/password credentials.
    async fn create_session(&self, identifier: &str, secret: &str) -> Result<Session>;

    /// Delete a session; [`CURRENT_SESSION`] addresses the active one.
    async fn delete_session(&self, session_ref: &str) -> Result<()>;

    /// Fetch the account bound to the active session.
    async fn get_current_account(&self) -> Result<AccountHandle>;

    /// List documents in order, applying the given filters.
    async fn list_documents(
        &self,
        collection: &CollectionRef,
        filters: &[Query],
    ) -> Result<Vec<Document>>;

    /// Create a document with the given id and user fields.
    async fn create_document(
        &self,
        collection: &CollectionRef,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document>;

    /// Upload a file to the configured storage bucket.
    async fn upload_file(&self, bytes: Bytes, file_name: &str, mime_type: &str)
        -> Result<FileHandle>;

    /// Resolve a URL for a stored file. No network round-trip.
    fn get_file_preview(&self, file_id: &str, preview: FilePreview) -> Result<String>;

    /// Resolve an avatar URL rendering the initials of `name`.
    fn avatar_initials(&self, name: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_constructors() {
        assert_eq!(
            Query::equal("creator", "johndoe"),
            Query::Equal {
                attribute: "creator".to_string(),
                values: vec![json!("johndoe")],
            }
        );
        assert_eq!(Query::limit(7), Query::Limit(7));
        assert_eq!(
            Query::order_desc("$createdAt"),
            Query::OrderDesc("$createdAt".to_string())
        );
    }

    #[test]
    fn document_string_fields() {
        let mut fields = Map::new();
        fields.insert("title".to_string(), json!("Sunset"));
        fields.insert("views".to_string(), json!(12));

        let document = Document {
            id: "doc1".to_string(),
            collection_id: "videos".to_string(),
            created_at: None,
            updated_at: None,
            fields,
        };

        assert_eq!(document.str_field("title"), Some("Sunset"));
        assert_eq!(document.str_field("views"), None);
        assert_eq!(document.str_field("missing"), None);
    }

    #[test]
    fn gravity_wire_names() {
        assert_eq!(Gravity::Top.as_str(), "top");
        assert_eq!(Gravity::BottomRight.as_str(), "bottom-right");
        assert_eq!(Gravity::default(), Gravity::Center);
    }
}
