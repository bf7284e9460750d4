//! S3-compatible asset host.

use super::{detect_resource_type, object_key, AssetDescriptor, AssetHost, Upload, UploadError};
use crate::config::AssetConfig;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

pub struct S3AssetHost {
    client: Client,
    bucket: String,
    folder: String,
    public_url: String,
}

impl S3AssetHost {
    /// Build a client from the asset settings. Static credentials win over the default AWS chain.
    pub async fn from_config(config: &AssetConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if let (Some(key), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(key, secret, None, None, "storefront-env"));
        }
        let shared = loader.load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        S3AssetHost {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            folder: config.folder.clone(),
            public_url: config.public_url.clone(),
        }
    }
}

#[async_trait]
impl AssetHost for S3AssetHost {
    async fn store(&self, upload: Upload) -> Result<AssetDescriptor, UploadError> {
        let key = object_key(&self.folder, &upload.file_name);
        let resource_type = detect_resource_type(upload.content_type.as_deref(), &upload.file_name);
        let size = upload.bytes.len();
        let content_type = upload
            .content_type
            .unwrap_or_else(|| "application/octet-stream".to_string());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(upload.bytes))
            .send()
            .await
            .map_err(|e| match e.raw_response() {
                Some(raw) => UploadError::Rejected(format!("status {}", raw.status().as_u16())),
                None => UploadError::Transport(e.to_string()),
            })?;
        tracing::info!(bucket = %self.bucket, key = %key, size, "asset stored");

        Ok(AssetDescriptor {
            url: format!("{}/{}", self.public_url, key),
            public_id: key,
            resource_type,
        })
    }
}
