// Public blob storage client (Vercel Blob HTTP API)

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::app_config::BlobConfig;

const API_VERSION: &str = "7";

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("BLOB_READ_WRITE_TOKEN is not configured")]
    MissingToken,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Blob store rejected upload ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Result of a successful upload.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedBlob {
    pub url: String,
    pub pathname: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload `bytes` publicly under `key`.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<UploadedBlob, BlobError>;
}

pub struct VercelBlobClient {
    http_client: reqwest::Client,
    api_url: String,
    token: String,
}

impl VercelBlobClient {
    pub fn new(config: &BlobConfig) -> Result<Self, BlobError> {
        let token = config
            .read_write_token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or(BlobError::MissingToken)?;

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .user_agent("MyDouble-Blob-Client/1.0")
            .build()?;

        Ok(Self {
            http_client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn upload_url(&self, key: &str) -> String {
        format!("{}/{}", self.api_url, key.trim_start_matches('/'))
    }
}

#[async_trait]
impl BlobStore for VercelBlobClient {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<UploadedBlob, BlobError> {
        let size = bytes.len();
        let response = self
            .http_client
            .put(self.upload_url(key))
            .bearer_auth(&self.token)
            .header("x-api-version", API_VERSION)
            .header("x-content-type", content_type)
            .header("x-add-random-suffix", "0")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BlobError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let uploaded: UploadedBlob = response.json().await?;
        info!("Uploaded {} bytes to {}", size, uploaded.url);
        Ok(uploaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob_config(token: Option<&str>) -> BlobConfig {
        BlobConfig {
            api_url: "https://blob.example.com/".to_string(),
            read_write_token: token.map(str::to_string),
        }
    }

    #[test]
    fn test_client_requires_token() {
        assert!(matches!(
            VercelBlobClient::new(&blob_config(None)),
            Err(BlobError::MissingToken)
        ));
        assert!(matches!(
            VercelBlobClient::new(&blob_config(Some(""))),
            Err(BlobError::MissingToken)
        ));
    }

    #[test]
    fn test_upload_url() {
        let client = VercelBlobClient::new(&blob_config(Some("vercel_blob_rw_x"))).unwrap();
        assert_eq!(client.upload_url("avatar-1.mp4"), "https://blob.example.com/avatar-1.mp4");
        assert_eq!(client.upload_url("/a/b.png"), "https://blob.example.com/a/b.png");
    }

    #[test]
    fn test_uploaded_blob_deserializes() {
        let blob: UploadedBlob = serde_json::from_str(
            r#"{"url":"https://x.public.blob.vercel-storage.com/avatar-1.mp4","pathname":"avatar-1.mp4","contentType":"video/mp4"}"#,
        )
        .unwrap();
        assert_eq!(blob.pathname, "avatar-1.mp4");
        assert_eq!(blob.content_type.as_deref(), Some("video/mp4"));
    }
}
