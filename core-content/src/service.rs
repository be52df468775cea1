//! Video library service: media uploads and post queries.

use std::sync::Arc;

use bridge_traits::{CollectionRef, Document, Query, RemoteBackend};
use core_runtime::config::BackendConfig;
use core_runtime::logging::strip_path;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{MediaAsset, MediaKind, NewVideoPost, VideoPost};
use crate::sanitize::sanitize_identifier;

/// Number of posts returned by [`VideoLibrary::latest_posts`].
pub const LATEST_POSTS_LIMIT: u32 = 7;

/// System attribute holding a document's creation time.
const CREATED_AT: &str = "$createdAt";

/// Publishing and browsing of video posts.
pub struct VideoLibrary {
    backend: Arc<dyn RemoteBackend>,
    videos: CollectionRef,
}

impl VideoLibrary {
    pub fn new(backend: Arc<dyn RemoteBackend>, config: &BackendConfig) -> Self {
        Self {
            backend,
            videos: config.videos(),
        }
    }

    /// Upload a file and resolve the URL it is served from.
    ///
    /// Videos resolve to the raw view URL, images to a 2000x2000
    /// top-anchored preview.
    #[instrument(skip(self, asset), fields(file = %strip_path(&asset.file_name), kind = ?kind))]
    pub async fn upload_media(&self, asset: MediaAsset, kind: MediaKind) -> Result<String> {
        let size = asset.bytes.len();
        let file = self
            .backend
            .upload_file(asset.bytes, &asset.file_name, &asset.mime_type)
            .await?;

        debug!(file_id = %file.id, size = size, "Media uploaded");
        Ok(self.backend.get_file_preview(&file.id, kind.preview())?)
    }

    /// Upload thumbnail and video concurrently, then store the post.
    ///
    /// If either upload fails no document is created.
    #[instrument(skip(self, post), fields(title = %post.title))]
    pub async fn create_video_post(&self, post: NewVideoPost) -> Result<VideoPost> {
        let creator = sanitize_identifier(Some(&post.creator));

        let (thumbnail, video) = futures::try_join!(
            self.upload_media(post.thumbnail, MediaKind::Image),
            self.upload_media(post.video, MediaKind::Video)
        )?;

        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(post.title));
        fields.insert("thumbnail".to_string(), Value::String(thumbnail));
        fields.insert("video".to_string(), Value::String(video));
        fields.insert("prompt".to_string(), Value::String(post.prompt));
        fields.insert("creator".to_string(), Value::String(creator));

        let document_id = Uuid::new_v4().simple().to_string();
        let document = self
            .backend
            .create_document(&self.videos, &document_id, fields)
            .await?;

        info!(post_id = %document.id, "Video post created");
        VideoPost::try_from(document)
    }

    pub async fn all_posts(&self) -> Result<Vec<VideoPost>> {
        self.query(&[]).await
    }

    /// Posts by a creator; the id is sanitized the same way it was on write.
    pub async fn user_posts(&self, user_id: &str) -> Result<Vec<VideoPost>> {
        let creator = sanitize_identifier(Some(user_id));
        self.query(&[Query::equal("creator", creator)]).await
    }

    /// Full-text search on post titles.
    pub async fn search_posts(&self, text: &str) -> Result<Vec<VideoPost>> {
        self.query(&[Query::search("title", text)]).await
    }

    /// The most recent posts, newest first.
    pub async fn latest_posts(&self) -> Result<Vec<VideoPost>> {
        self.query(&[
            Query::order_desc(CREATED_AT),
            Query::limit(LATEST_POSTS_LIMIT),
        ])
        .await
    }

    async fn query(&self, filters: &[Query]) -> Result<Vec<VideoPost>> {
        let documents = self.backend.list_documents(&self.videos, filters).await?;
        to_posts(documents)
    }
}

fn to_posts(documents: Vec<Document>) -> Result<Vec<VideoPost>> {
    documents.into_iter().map(VideoPost::try_from).collect()
}
