//! Media upload: forward a binary blob to the asset host and describe the stored object.

mod s3;

pub use s3::S3AssetHost;

use crate::error::AppError;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Image,
    /// Video and audio.
    Video,
    Raw,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDescriptor {
    pub url: String,
    /// Object key on the asset host.
    pub public_id: String,
    pub resource_type: ResourceType,
}

/// A validated file part ready to forward.
#[derive(Clone, Debug)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("asset host transport: {0}")]
    Transport(String),
    #[error("asset host rejected upload: {0}")]
    Rejected(String),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        tracing::error!(error = %err, "upload failed");
        AppError::Upstream("upload failed".into())
    }
}

#[async_trait]
pub trait AssetHost: Send + Sync {
    async fn store(&self, upload: Upload) -> Result<AssetDescriptor, UploadError>;
}

fn extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Detect from the content type, falling back to the file extension.
pub fn detect_resource_type(content_type: Option<&str>, file_name: &str) -> ResourceType {
    let essence = content_type
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty() && ct != "application/octet-stream");
    if let Some(ct) = essence {
        if ct.starts_with("image/") {
            return ResourceType::Image;
        }
        if ct.starts_with("video/") || ct.starts_with("audio/") {
            return ResourceType::Video;
        }
        return ResourceType::Raw;
    }
    match extension(file_name).as_deref() {
        Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" | "avif" | "bmp" | "ico") => ResourceType::Image,
        Some("mp4" | "webm" | "mov" | "mkv" | "avi" | "mp3" | "wav" | "ogg" | "m4a") => ResourceType::Video,
        _ => ResourceType::Raw,
    }
}

/// True for parts that carry text rather than a file payload.
pub fn is_textual(content_type: &str) -> bool {
    let ct = content_type.split(';').next().unwrap_or(content_type).trim().to_ascii_lowercase();
    ct.starts_with("text/") || ct == "application/json"
}

/// `<folder>/<uuid>[.<ext>]`
pub fn object_key(folder: &str, file_name: &str) -> String {
    let id = uuid::Uuid::new_v4();
    let folder = folder.trim_matches('/');
    match extension(file_name) {
        Some(ext) => format!("{}/{}.{}", folder, id, ext),
        None => format!("{}/{}", folder, id),
    }
}
