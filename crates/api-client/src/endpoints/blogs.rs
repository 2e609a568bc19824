//! Blog endpoints
//!
//! Maps to `/blogs`: paginated list, get, create, update, delete.

use super::Audit;
use crate::client::AdminClient;
use crate::envelope::{Page, PageQuery};
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use velora_core::validation::Validator;

/// Blogs API interface
#[derive(Clone)]
pub struct BlogsApi {
    client: AdminClient,
}

impl BlogsApi {
    /// Create a new blogs API interface
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List blog posts with pagination
    ///
    /// GET /blogs
    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Blog>> {
        let path = format!("blogs?{}", query.to_query());
        self.client.get(&path).await
    }

    /// Get a single blog post by ID
    ///
    /// GET /blogs/{id}
    pub async fn get(&self, id: i64) -> ApiResult<Blog> {
        self.client.get(&format!("blogs/{id}")).await
    }

    /// Create a new blog post
    ///
    /// POST /blogs
    pub async fn create(&self, request: &BlogRequest) -> ApiResult<Blog> {
        request.validate()?;
        self.client.post("blogs", request).await
    }

    /// Update an existing blog post
    ///
    /// PUT /blogs/{id}
    pub async fn update(&self, id: i64, request: &BlogRequest) -> ApiResult<Blog> {
        request.validate()?;
        self.client.put(&format!("blogs/{id}"), request).await
    }

    /// Delete a blog post
    ///
    /// DELETE /blogs/{id}
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("blogs/{id}")).await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    /// Identifier
    pub id: i64,
    /// Title
    pub title: String,
    /// Body (markdown or HTML as authored)
    pub content: String,
    /// Thumbnail image URL
    pub thumbnail_url: Option<String>,
    /// Audit fields
    #[serde(flatten)]
    pub audit: Audit,
}

/// Create/update payload for a blog post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRequest {
    /// Title
    pub title: String,
    /// Body
    pub content: String,
    /// Thumbnail image URL
    pub thumbnail_url: Option<String>,
}

impl BlogRequest {
    /// Create a request
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            thumbnail_url: None,
        }
    }

    /// Set the thumbnail URL
    #[must_use]
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    fn validate(&self) -> ApiResult<()> {
        let result = Validator::new()
            .required("title", &self.title)
            .max_length("title", &self.title, 160)
            .required("content", &self.content)
            .validate();
        if result.is_valid() {
            Ok(())
        } else {
            Err(result.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_deserialize() {
        let json = r#"{
            "id": 9,
            "title": "Summer lookbook",
            "content": "Our picks for the season.",
            "thumbnailUrl": "https://cdn.velora.shop/blog/9.jpg",
            "createdAt": "2026-08-06T10:15:00Z"
        }"#;

        let blog: Blog = serde_json::from_str(json).unwrap();
        assert_eq!(blog.id, 9);
        assert!(blog.thumbnail_url.is_some());
    }

    #[test]
    fn test_request_rejects_missing_content() {
        let request = BlogRequest::new("Summer lookbook", " ");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_accepts_valid_payload() {
        let request = BlogRequest::new("Summer lookbook", "Our picks.")
            .with_thumbnail("https://cdn.velora.shop/blog/draft.jpg");
        assert!(request.validate().is_ok());
    }
}
