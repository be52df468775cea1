//! Video-post domain models

use bridge_traits::{Document, FilePreview, Gravity};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Edge length of the server-rendered thumbnail preview.
pub const PREVIEW_SIZE: u32 = 2000;

/// JPEG quality of the thumbnail preview.
pub const PREVIEW_QUALITY: u8 = 100;

/// How an uploaded file is served back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    /// Served as a top-anchored preview image
    Image,
    /// Served raw through the file view URL
    Video,
}

impl MediaKind {
    pub fn preview(&self) -> FilePreview {
        match self {
            MediaKind::Image => FilePreview::Image {
                width: PREVIEW_SIZE,
                height: PREVIEW_SIZE,
                gravity: Gravity::Top,
                quality: PREVIEW_QUALITY,
            },
            MediaKind::Video => FilePreview::View,
        }
    }
}

/// A picked file ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaAsset {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl MediaAsset {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Input for publishing a video post.
#[derive(Debug, Clone)]
pub struct NewVideoPost {
    pub title: String,
    pub prompt: String,
    /// Free-text creator id; sanitized before it is stored
    pub creator: String,
    pub thumbnail: MediaAsset,
    pub video: MediaAsset,
}

/// A published video post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoPost {
    pub id: String,
    pub title: String,
    /// Thumbnail preview URL
    pub thumbnail: String,
    /// Video view URL
    pub video: String,
    pub prompt: String,
    pub creator: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<Document> for VideoPost {
    type Error = ContentError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        let required = |name: &str| {
            document
                .str_field(name)
                .map(str::to_string)
                .ok_or_else(|| {
                    ContentError::InvalidDocument(format!(
                        "document {} is missing '{}'",
                        document.id, name
                    ))
                })
        };

        Ok(Self {
            title: required("title")?,
            thumbnail: required("thumbnail")?,
            video: required("video")?,
            creator: required("creator")?,
            prompt: document.str_field("prompt").unwrap_or_default().to_string(),
            id: document.id.clone(),
            created_at: document.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn document(fields: Value) -> Document {
        let fields: Map<String, Value> = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Document {
            id: "post-1".to_string(),
            collection_id: "videos".to_string(),
            created_at: None,
            updated_at: None,
            fields,
        }
    }

    #[test]
    fn media_kind_previews() {
        assert_eq!(MediaKind::Video.preview(), FilePreview::View);
        assert_eq!(
            MediaKind::Image.preview(),
            FilePreview::Image {
                width: 2000,
                height: 2000,
                gravity: Gravity::Top,
                quality: 100,
            }
        );
    }

    #[test]
    fn video_post_from_document() {
        let post = VideoPost::try_from(document(json!({
            "title": "Sunset",
            "thumbnail": "https://cdn.test/thumb",
            "video": "https://cdn.test/video",
            "creator": "johndoe123",
        })))
        .unwrap();

        assert_eq!(post.id, "post-1");
        assert_eq!(post.title, "Sunset");
        assert_eq!(post.prompt, "");
    }

    #[test]
    fn video_post_requires_urls() {
        let err = VideoPost::try_from(document(json!({
            "title": "Sunset",
            "creator": "johndoe123",
        })))
        .unwrap_err();

        assert!(matches!(err, ContentError::InvalidDocument(msg) if msg.contains("thumbnail")));
    }
}
