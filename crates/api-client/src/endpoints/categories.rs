//! Category endpoints
//!
//! Maps to `/categories`: paginated list, get, create, update, delete.

use super::Audit;
use crate::client::AdminClient;
use crate::envelope::{Page, PageQuery};
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use velora_core::validation::Validator;

/// Categories API interface
#[derive(Clone)]
pub struct CategoriesApi {
    client: AdminClient,
}

impl CategoriesApi {
    /// Create a new categories API interface
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List categories with pagination
    ///
    /// GET /categories
    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Category>> {
        let path = format!("categories?{}", query.to_query());
        self.client.get(&path).await
    }

    /// Get a single category by ID
    ///
    /// GET /categories/{id}
    pub async fn get(&self, id: i64) -> ApiResult<Category> {
        self.client.get(&format!("categories/{id}")).await
    }

    /// Create a new category
    ///
    /// POST /categories
    pub async fn create(&self, request: &CategoryRequest) -> ApiResult<Category> {
        request.validate()?;
        self.client.post("categories", request).await
    }

    /// Update an existing category
    ///
    /// PUT /categories/{id}
    pub async fn update(&self, id: i64, request: &CategoryRequest) -> ApiResult<Category> {
        request.validate()?;
        self.client.put(&format!("categories/{id}"), request).await
    }

    /// Delete a category
    ///
    /// DELETE /categories/{id}
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("categories/{id}")).await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Audit fields
    #[serde(flatten)]
    pub audit: Audit,
}

/// Create/update payload for a category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

impl CategoryRequest {
    /// Create a request with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn validate(&self) -> ApiResult<()> {
        let mut validator = Validator::new()
            .required("name", &self.name)
            .min_length("name", &self.name, 2)
            .max_length("name", &self.name, 80);
        if let Some(ref description) = self.description {
            validator = validator.max_length("description", description, 500);
        }

        let result = validator.validate();
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
    fn test_category_deserialize() {
        let json = r#"{
            "id": 3,
            "name": "Dresses",
            "description": "Summer and winter dresses",
            "createdAt": "2026-08-06T10:15:00Z",
            "createdBy": "ops@velora.shop"
        }"#;

        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.id, 3);
        assert_eq!(category.name, "Dresses");
        assert_eq!(category.audit.created_by.as_deref(), Some("ops@velora.shop"));
    }

    #[test]
    fn test_request_builder() {
        let request = CategoryRequest::new("Shoes").with_description("Footwear");
        assert_eq!(request.name, "Shoes");
        assert_eq!(request.description.as_deref(), Some("Footwear"));
    }

    #[test]
    fn test_request_rejects_empty_name() {
        let request = CategoryRequest::new("  ");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_rejects_single_character_name() {
        let request = CategoryRequest::new("X");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_accepts_valid_payload() {
        let request = CategoryRequest::new("Shoes");
        assert!(request.validate().is_ok());
    }
}
