//! Scripted in-memory `RemoteBackend` shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bridge_traits::error::Result;
use bridge_traits::{
    AccountHandle, BridgeError, CollectionRef, Document, FileHandle, FilePreview, Query,
    RemoteBackend, Session,
};
use bytes::Bytes;
use core_runtime::config::BackendConfig;
use serde_json::{Map, Value};

pub const RATE_LIMITED: &str = "Too many requests: rate limit exceeded, please try again later";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please check the email and password.";

pub fn session(id: &str) -> Session {
    Session {
        id: id.to_string(),
        user_id: "acc-1".to_string(),
        expire: None,
        current: true,
    }
}

pub fn backend_config() -> BackendConfig {
    BackendConfig::builder()
        .project_id("66e34e690029213c5f9d")
        .platform("co.edu.sena.soy.plattea")
        .database_id("66e3518b002f261f4923")
        .user_collection_id("66e351e2001332958d40")
        .video_collection_id("66e3521b0009801951a5")
        .storage_id("66e3563d00116767943c")
        .build()
        .expect("valid test config")
}

#[derive(Default)]
pub struct ScriptedBackend {
    session_script: Mutex<VecDeque<Result<Session>>>,
    session_calls: AtomicUsize,
    account: Mutex<Option<AccountHandle>>,
    account_creation_error: Mutex<Option<String>>,
    documents: Mutex<Vec<(CollectionRef, Document)>>,
    deleted_sessions: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the results of successive `create_session` calls.
    pub fn with_sessions(self, script: Vec<Result<Session>>) -> Self {
        *self.session_script.lock().unwrap() = script.into();
        self
    }

    pub fn with_account(self, account: AccountHandle) -> Self {
        *self.account.lock().unwrap() = Some(account);
        self
    }

    pub fn failing_account_creation(self, message: &str) -> Self {
        *self.account_creation_error.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn with_document(self, collection: CollectionRef, document: Document) -> Self {
        self.documents.lock().unwrap().push((collection, document));
        self
    }

    pub fn session_calls(&self) -> usize {
        self.session_calls.load(Ordering::SeqCst)
    }

    pub fn documents_in(&self, collection: &CollectionRef) -> Vec<Document> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c == collection)
            .map(|(_, d)| d.clone())
            .collect()
    }

    pub fn deleted_sessions(&self) -> Vec<String> {
        self.deleted_sessions.lock().unwrap().clone()
    }
}

fn matches_filters(document: &Document, filters: &[Query]) -> bool {
    filters.iter().all(|filter| match filter {
        Query::Equal { attribute, values } => document
            .fields
            .get(attribute)
            .map(|value| values.contains(value))
            .unwrap_or(false),
        _ => true,
    })
}

#[async_trait]
impl RemoteBackend for ScriptedBackend {
    async fn create_account(
        &self,
        identifier: &str,
        _secret: &str,
        display_name: &str,
    ) -> Result<AccountHandle> {
        if let Some(message) = self.account_creation_error.lock().unwrap().clone() {
            return Err(BridgeError::remote(message));
        }

        let account = AccountHandle {
            id: "acc-1".to_string(),
            email: identifier.to_string(),
            name: display_name.to_string(),
        };
        *self.account.lock().unwrap() = Some(account.clone());
        Ok(account)
    }

    async fn create_session(&self, _identifier: &str, _secret: &str) -> Result<Session> {
        self.session_calls.fetch_add(1, Ordering::SeqCst);
        self.session_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BridgeError::remote("unscripted create_session call")))
    }

    async fn delete_session(&self, session_ref: &str) -> Result<()> {
        self.deleted_sessions
            .lock()
            .unwrap()
            .push(session_ref.to_string());
        Ok(())
    }

    async fn get_current_account(&self) -> Result<AccountHandle> {
        self.account.lock().unwrap().clone().ok_or(BridgeError::Remote {
            status: Some(401),
            kind: Some("general_unauthorized_scope".to_string()),
            message: "User (role: guests) missing scope (account)".to_string(),
        })
    }

    async fn list_documents(
        &self,
        collection: &CollectionRef,
        filters: &[Query],
    ) -> Result<Vec<Document>> {
        Ok(self
            .documents_in(collection)
            .into_iter()
            .filter(|d| matches_filters(d, filters))
            .collect())
    }

    async fn create_document(
        &self,
        collection: &CollectionRef,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document> {
        let document = Document {
            id: id.to_string(),
            collection_id: collection.collection_id.clone(),
            created_at: None,
            updated_at: None,
            fields,
        };
        self.documents
            .lock()
            .unwrap()
            .push((collection.clone(), document.clone()));
        Ok(document)
    }

    async fn upload_file(
        &self,
        _bytes: Bytes,
        _file_name: &str,
        _mime_type: &str,
    ) -> Result<FileHandle> {
        Err(BridgeError::NotAvailable("storage".to_string()))
    }

    fn get_file_preview(&self, _file_id: &str, _preview: FilePreview) -> Result<String> {
        Err(BridgeError::NotAvailable("storage".to_string()))
    }

    fn avatar_initials(&self, name: &str) -> Result<String> {
        Ok(format!("https://avatars.test/initials?name={}", name))
    }
}
