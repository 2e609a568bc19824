//! Color endpoints
//!
//! Maps to `/colors`: paginated list, get, create, update, delete.

use super::Audit;
use crate::client::AdminClient;
use crate::envelope::{Page, PageQuery};
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use velora_core::validation::{Validator, HEX_COLOR_PATTERN};

/// Colors API interface
#[derive(Clone)]
pub struct ColorsApi {
    client: AdminClient,
}

impl ColorsApi {
    /// Create a new colors API interface
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List colors with pagination
    ///
    /// GET /colors
    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Color>> {
        let path = format!("colors?{}", query.to_query());
        self.client.get(&path).await
    }

    /// Get a single color by ID
    ///
    /// GET /colors/{id}
    pub async fn get(&self, id: i64) -> ApiResult<Color> {
        self.client.get(&format!("colors/{id}")).await
    }

    /// Create a new color
    ///
    /// POST /colors
    pub async fn create(&self, request: &ColorRequest) -> ApiResult<Color> {
        request.validate()?;
        self.client.post("colors", request).await
    }

    /// Update an existing color
    ///
    /// PUT /colors/{id}
    pub async fn update(&self, id: i64, request: &ColorRequest) -> ApiResult<Color> {
        request.validate()?;
        self.client.put(&format!("colors/{id}"), request).await
    }

    /// Delete a color
    ///
    /// DELETE /colors/{id}
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("colors/{id}")).await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Product color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    /// Identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Hex code (`#RRGGBB`)
    pub code: String,
    /// Audit fields
    #[serde(flatten)]
    pub audit: Audit,
}

/// Create/update payload for a color
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorRequest {
    /// Display name
    pub name: String,
    /// Hex code (`#RRGGBB`)
    pub code: String,
}

impl ColorRequest {
    /// Create a request
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    fn validate(&self) -> ApiResult<()> {
        let result = Validator::new()
            .required("name", &self.name)
            .max_length("name", &self.name, 60)
            .pattern("code", &self.code, HEX_COLOR_PATTERN, "hex color code")
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
    fn test_color_deserialize() {
        let json = r##"{
            "id": 5,
            "name": "Midnight Blue",
            "code": "#191970",
            "updatedAt": "2026-08-06T10:15:00Z"
        }"##;

        let color: Color = serde_json::from_str(json).unwrap();
        assert_eq!(color.name, "Midnight Blue");
        assert_eq!(color.code, "#191970");
    }

    #[test]
    fn test_request_rejects_bad_hex_code() {
        let request = ColorRequest::new("Mint", "191970");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_accepts_short_hex_code() {
        let request = ColorRequest::new("White", "#fff");
        assert!(request.validate().is_ok());
    }
}
