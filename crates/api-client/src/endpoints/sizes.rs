//! Size endpoints
//!
//! Maps to `/sizes`: paginated list, get, create, update, delete.
//!
//! Sizes carry height/weight fitting bands; both bands must be ordered
//! (`min <= max`) and non-negative, checked client-side before any request.

use super::Audit;
use crate::client::AdminClient;
use crate::envelope::{Page, PageQuery};
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use velora_core::validation::{validate_size_bands, Validator};

/// Sizes API interface
#[derive(Clone)]
pub struct SizesApi {
    client: AdminClient,
}

impl SizesApi {
    /// Create a new sizes API interface
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List sizes with pagination
    ///
    /// GET /sizes
    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Size>> {
        let path = format!("sizes?{}", query.to_query());
        self.client.get(&path).await
    }

    /// Get a single size by ID
    ///
    /// GET /sizes/{id}
    pub async fn get(&self, id: i64) -> ApiResult<Size> {
        self.client.get(&format!("sizes/{id}")).await
    }

    /// Create a new size
    ///
    /// POST /sizes
    pub async fn create(&self, request: &SizeRequest) -> ApiResult<Size> {
        request.validate()?;
        self.client.post("sizes", request).await
    }

    /// Update an existing size
    ///
    /// PUT /sizes/{id}
    pub async fn update(&self, id: i64, request: &SizeRequest) -> ApiResult<Size> {
        request.validate()?;
        self.client.put(&format!("sizes/{id}"), request).await
    }

    /// Delete a size
    ///
    /// DELETE /sizes/{id}
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("sizes/{id}")).await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Product size with fitting bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    /// Identifier
    pub id: i64,
    /// Label (`S`, `M`, `XL`, ...)
    pub name: String,
    /// Minimum fitting height in cm
    pub min_height: f64,
    /// Maximum fitting height in cm
    pub max_height: f64,
    /// Minimum fitting weight in kg
    pub min_weight: f64,
    /// Maximum fitting weight in kg
    pub max_weight: f64,
    /// Audit fields
    #[serde(flatten)]
    pub audit: Audit,
}

/// Create/update payload for a size
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeRequest {
    /// Label (`S`, `M`, `XL`, ...)
    pub name: String,
    /// Minimum fitting height in cm
    pub min_height: f64,
    /// Maximum fitting height in cm
    pub max_height: f64,
    /// Minimum fitting weight in kg
    pub min_weight: f64,
    /// Maximum fitting weight in kg
    pub max_weight: f64,
}

impl SizeRequest {
    /// Create a request
    pub fn new(
        name: impl Into<String>,
        height_band: (f64, f64),
        weight_band: (f64, f64),
    ) -> Self {
        Self {
            name: name.into(),
            min_height: height_band.0,
            max_height: height_band.1,
            min_weight: weight_band.0,
            max_weight: weight_band.1,
        }
    }

    fn validate(&self) -> ApiResult<()> {
        let mut result = Validator::new()
            .required("name", &self.name)
            .max_length("name", &self.name, 20)
            .validate();
        result.merge(validate_size_bands(
            self.min_height,
            self.max_height,
            self.min_weight,
            self.max_weight,
        ));

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
    fn test_size_deserialize() {
        let json = r#"{
            "id": 2,
            "name": "M",
            "minHeight": 165.0,
            "maxHeight": 175.0,
            "minWeight": 55.0,
            "maxWeight": 68.0
        }"#;

        let size: Size = serde_json::from_str(json).unwrap();
        assert_eq!(size.name, "M");
        assert_eq!(size.min_height, 165.0);
        assert_eq!(size.max_weight, 68.0);
    }

    #[test]
    fn test_request_accepts_ordered_bands() {
        let request = SizeRequest::new("L", (175.0, 185.0), (68.0, 80.0));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_rejects_inverted_height_band() {
        let request = SizeRequest::new("L", (185.0, 175.0), (68.0, 80.0));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_rejects_inverted_weight_band() {
        let request = SizeRequest::new("L", (175.0, 185.0), (80.0, 68.0));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_rejects_empty_name() {
        let request = SizeRequest::new("", (175.0, 185.0), (68.0, 80.0));
        assert!(request.validate().is_err());
    }
}
