//! Certificate upload seam.
//!
//! Rendered certificates and their metadata are pinned to IPFS through a
//! Pinata-style gateway. Only a mock uploader exists: it waits, then hands
//! back a gateway URL with a fake content id.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use entities::Certificate;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Gateway prefix of returned URLs.
pub const PINATA_GATEWAY: &str = "https://gateway.pinata.cloud/ipfs/";

/// Outcome of an upload. Failures are reported here, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    #[serde(rename = "pinataURL")]
    pub pinata_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UploadResponse {
    pub fn success(pinata_url: impl Into<String>) -> Self {
        Self {
            success: true,
            pinata_url: pinata_url.into(),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            pinata_url: String::new(),
            message: Some(message.into()),
        }
    }
}

/// Trait for uploading certificate artifacts.
#[async_trait]
pub trait CertificateUploader: Send + Sync + std::fmt::Debug {
    /// Uploads a rendered file.
    async fn upload_file(&self, file_name: &str, contents: &[u8]) -> UploadResponse;

    /// Uploads JSON metadata.
    async fn upload_json(&self, value: &serde_json::Value) -> UploadResponse;

    /// Uploads the token metadata pointing at an uploaded certificate image.
    async fn upload_metadata(
        &self,
        certificate: &Certificate,
        image_url: &str,
    ) -> UploadResponse {
        let metadata = json!({
            "name": certificate.student,
            "image": image_url,
            "register_number": certificate.register_number,
        });
        self.upload_json(&metadata).await
    }
}

/// Uploader that simulates a Pinata round trip.
#[derive(Debug, Clone)]
pub struct MockPinataUploader {
    delay: Duration,
}

impl MockPinataUploader {
    /// Creates a mock that answers after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockPinataUploader {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl CertificateUploader for MockPinataUploader {
    async fn upload_file(&self, file_name: &str, contents: &[u8]) -> UploadResponse {
        tracing::info!(file_name, bytes = contents.len(), "Uploading file to IPFS");
        if contents.is_empty() {
            return UploadResponse::failure(format!("{file_name} is empty"));
        }
        tokio::time::sleep(self.delay).await;
        UploadResponse::success(format!(
            "{PINATA_GATEWAY}mockCID_{}",
            Utc::now().timestamp_millis()
        ))
    }

    async fn upload_json(&self, value: &serde_json::Value) -> UploadResponse {
        tracing::info!(bytes = value.to_string().len(), "Uploading JSON to IPFS");
        tokio::time::sleep(self.delay).await;
        UploadResponse::success(format!(
            "{PINATA_GATEWAY}mockCID_JSON_{}",
            Utc::now().timestamp_millis()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_file_upload() {
        let uploader = MockPinataUploader::new(Duration::ZERO);
        let response = uploader.upload_file("cert-001.jpg", b"jpeg bytes").await;

        assert!(response.success);
        assert!(response
            .pinata_url
            .starts_with("https://gateway.pinata.cloud/ipfs/mockCID_"));
        assert!(response.message.is_none());
    }

    #[tokio::test]
    async fn test_mock_empty_file_fails() {
        let uploader = MockPinataUploader::new(Duration::ZERO);
        let response = uploader.upload_file("blank.jpg", &[]).await;

        assert!(!response.success);
        assert!(response.pinata_url.is_empty());
        assert_eq!(response.message.as_deref(), Some("blank.jpg is empty"));
    }

    #[derive(Debug, Default)]
    struct RecordingUploader {
        json: std::sync::Mutex<Vec<serde_json::Value>>,
    }

    #[async_trait]
    impl CertificateUploader for RecordingUploader {
        async fn upload_file(&self, _file_name: &str, _contents: &[u8]) -> UploadResponse {
            UploadResponse::success("file")
        }

        async fn upload_json(&self, value: &serde_json::Value) -> UploadResponse {
            self.json.lock().unwrap().push(value.clone());
            UploadResponse::success("json")
        }
    }

    #[tokio::test]
    async fn test_upload_metadata() {
        let uploader = RecordingUploader::default();
        let certificate = Certificate::new("cert-001", "Hackathon", "Merit", "CSE")
            .for_student("Asha", "R1");

        let response = uploader
            .upload_metadata(&certificate, "https://gateway.pinata.cloud/ipfs/img")
            .await;
        assert!(response.success);

        let sent = uploader.json.lock().unwrap();
        assert_eq!(
            sent[0],
            json!({
                "name": "Asha",
                "image": "https://gateway.pinata.cloud/ipfs/img",
                "register_number": "R1",
            })
        );
    }

    #[tokio::test]
    async fn test_mock_json_upload() {
        let uploader = MockPinataUploader::new(Duration::ZERO);
        let response = uploader.upload_json(&json!({ "name": "Asha" })).await;

        assert!(response.success);
        assert!(response.pinata_url.contains("mockCID_JSON_"));
    }

    #[test]
    fn test_response_layout() {
        let value = serde_json::to_value(UploadResponse::success("u")).unwrap();
        assert_eq!(value["pinataURL"], "u");
        assert!(value.get("message").is_none());
    }
}
