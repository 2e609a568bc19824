//! Image upload endpoints
//!
//! Maps to `/images/upload` and `/images/upload/batch`. Uploads are
//! multipart form data; files are read into memory by the caller so the
//! request can be rebuilt if the first attempt hits a 401.

use crate::client::AdminClient;
use crate::error::{ApiError, ApiResult};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

/// Images API interface
#[derive(Clone)]
pub struct ImagesApi {
    client: AdminClient,
}

impl ImagesApi {
    /// Create a new images API interface
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// Upload a single image
    ///
    /// POST /images/upload
    pub async fn upload(&self, file: &UploadFile) -> ApiResult<UploadedImage> {
        file.validate()?;
        self.client
            .post_multipart("images/upload", || {
                Form::new().part("file", file.to_part())
            })
            .await
    }

    /// Upload several images in one request
    ///
    /// POST /images/upload/batch
    pub async fn upload_batch(&self, files: &[UploadFile]) -> ApiResult<Vec<UploadedImage>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }
        for file in files {
            file.validate()?;
        }

        self.client
            .post_multipart("images/upload/batch", || {
                let mut form = Form::new();
                for file in files {
                    form = form.part("files", file.to_part());
                }
                form
            })
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// In-memory file queued for upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// File name sent to the backend
    pub file_name: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Create an upload from in-memory bytes
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a file from disk into an upload
    pub fn from_path(path: impl AsRef<std::path::Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ApiError::config(format!("Not a file path: {}", path.display())))?;
        let bytes = std::fs::read(path)
            .map_err(|e| ApiError::config(format!("Failed to read {}: {e}", path.display())))?;
        Ok(Self { file_name, bytes })
    }

    /// Size of the file in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the file is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn to_part(&self) -> Part {
        Part::bytes(self.bytes.clone()).file_name(self.file_name.clone())
    }

    fn validate(&self) -> ApiResult<()> {
        if self.is_empty() {
            return Err(ApiError::config(format!(
                "Refusing to upload empty file: {}",
                self.file_name
            )));
        }
        Ok(())
    }
}

/// Uploaded image descriptor returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    /// Public URL of the stored image
    pub url: String,
    /// File name as stored
    pub file_name: Option<String>,
    /// Stored size in bytes
    pub size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_file_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front.jpg");
        std::fs::write(&path, b"jpeg-bytes").unwrap();

        let file = UploadFile::from_path(&path).unwrap();
        assert_eq!(file.file_name, "front.jpg");
        assert_eq!(file.len(), 10);
    }

    #[test]
    fn test_upload_file_rejects_empty() {
        let file = UploadFile::new("empty.png", Vec::new());
        assert!(file.validate().is_err());
    }

    #[test]
    fn test_uploaded_image_deserialize() {
        let json = r#"{
            "url": "https://cdn.velora.shop/p/abc.jpg",
            "fileName": "abc.jpg",
            "size": 51234
        }"#;

        let image: UploadedImage = serde_json::from_str(json).unwrap();
        assert_eq!(image.size, Some(51234));
    }
}
