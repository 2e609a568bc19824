//! Product endpoints
//!
//! Maps to `/products`:
//! - List products with pagination and search
//! - Get a single product by ID
//! - Create a new product with images and color/size variants
//! - Update an existing product
//! - Delete a product

use super::Audit;
use crate::client::AdminClient;
use crate::envelope::{Page, PageQuery};
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use velora_core::validation::Validator;

/// Products API interface
#[derive(Clone)]
pub struct ProductsApi {
    client: AdminClient,
}

impl ProductsApi {
    /// Create a new products API interface
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List products with pagination
    ///
    /// GET /products
    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Product>> {
        let path = format!("products?{}", query.to_query());
        self.client.get(&path).await
    }

    /// List products in one category
    ///
    /// GET /products?categoryId={id}
    pub async fn list_by_category(
        &self,
        category_id: i64,
        query: &PageQuery,
    ) -> ApiResult<Page<Product>> {
        let path = format!("products?categoryId={category_id}&{}", query.to_query());
        self.client.get(&path).await
    }

    /// Get a single product by ID
    ///
    /// GET /products/{id}
    pub async fn get(&self, id: i64) -> ApiResult<Product> {
        self.client.get(&format!("products/{id}")).await
    }

    /// Create a new product
    ///
    /// POST /products
    pub async fn create(&self, request: &CreateProductRequest) -> ApiResult<Product> {
        request.validate()?;
        self.client.post("products", request).await
    }

    /// Update an existing product
    ///
    /// PUT /products/{id}
    pub async fn update(&self, id: i64, request: &UpdateProductRequest) -> ApiResult<Product> {
        request.validate()?;
        self.client.put(&format!("products/{id}"), request).await
    }

    /// Delete a product
    ///
    /// DELETE /products/{id}
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("products/{id}")).await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Unit price in the store currency
    pub price: f64,
    /// Owning category, if assigned
    pub category_id: Option<i64>,
    /// Gallery images
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Color/size/quantity variants
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    /// Audit fields
    #[serde(flatten)]
    pub audit: Audit,
}

/// Product gallery image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    /// Identifier, absent for not-yet-persisted images
    pub id: Option<i64>,
    /// Image URL
    pub url: String,
    /// Position within the gallery
    pub position: Option<u32>,
}

/// Stock entry for one color/size combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Color reference
    pub color_id: i64,
    /// Size reference
    pub size_id: i64,
    /// Units in stock
    pub quantity: i64,
}

/// Create product request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Unit price in the store currency
    pub price: f64,
    /// Owning category
    pub category_id: Option<i64>,
    /// Image URLs (from a prior upload)
    pub images: Vec<String>,
    /// Color/size/quantity variants
    pub variants: Vec<ProductVariant>,
}

impl CreateProductRequest {
    /// Create a request with name and price
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Add an image URL
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Add a variant
    #[must_use]
    pub fn with_variant(mut self, color_id: i64, size_id: i64, quantity: i64) -> Self {
        self.variants.push(ProductVariant {
            color_id,
            size_id,
            quantity,
        });
        self
    }

    fn validate(&self) -> ApiResult<()> {
        let mut validator = Validator::new()
            .required("name", &self.name)
            .min_length("name", &self.name, 2)
            .max_length("name", &self.name, 160)
            .non_negative("price", self.price);
        if let Some(ref description) = self.description {
            validator = validator.max_length("description", description, 2000);
        }

        let mut result = validator.validate();
        result.merge(validate_variants(&self.variants));

        if result.is_valid() {
            Ok(())
        } else {
            Err(result.into())
        }
    }
}

/// Update product request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    /// New display name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New unit price
    pub price: Option<f64>,
    /// New owning category
    pub category_id: Option<i64>,
    /// Replacement image URL list
    pub images: Option<Vec<String>>,
    /// Replacement variant list
    pub variants: Option<Vec<ProductVariant>>,
}

impl UpdateProductRequest {
    fn validate(&self) -> ApiResult<()> {
        let mut validator = Validator::new();
        if let Some(ref name) = self.name {
            validator = validator
                .required("name", name)
                .min_length("name", name, 2)
                .max_length("name", name, 160);
        }
        if let Some(ref description) = self.description {
            validator = validator.max_length("description", description, 2000);
        }
        if let Some(price) = self.price {
            validator = validator.non_negative("price", price);
        }

        let mut result = validator.validate();
        if let Some(ref variants) = self.variants {
            result.merge(validate_variants(variants));
        }

        if result.is_valid() {
            Ok(())
        } else {
            Err(result.into())
        }
    }
}

fn validate_variants(variants: &[ProductVariant]) -> velora_core::validation::ValidationResult {
    let mut validator = Validator::new();
    for (idx, variant) in variants.iter().enumerate() {
        validator = validator.non_negative(&format!("variants[{idx}].quantity"), variant.quantity);
    }
    validator.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserialize() {
        let json = r#"{
            "id": 101,
            "name": "Linen Shirt",
            "description": "Breathable summer shirt",
            "price": 49.9,
            "categoryId": 3,
            "images": [
                {"id": 7, "url": "https://cdn.velora.shop/p/101-front.jpg", "position": 0}
            ],
            "variants": [
                {"colorId": 5, "sizeId": 2, "quantity": 12}
            ],
            "createdAt": "2026-08-06T10:15:00Z"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 101);
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.variants[0].quantity, 12);
    }

    #[test]
    fn test_product_deserialize_without_collections() {
        let json = r#"{
            "id": 102,
            "name": "Belt",
            "description": null,
            "price": 15.0,
            "categoryId": null
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.images.is_empty());
        assert!(product.variants.is_empty());
    }

    #[test]
    fn test_create_request_builder() {
        let request = CreateProductRequest::new("Linen Shirt", 49.9)
            .with_category(3)
            .with_image("https://cdn.velora.shop/p/draft.jpg")
            .with_variant(5, 2, 12);

        assert_eq!(request.category_id, Some(3));
        assert_eq!(request.images.len(), 1);
        assert_eq!(request.variants.len(), 1);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_negative_price() {
        let request = CreateProductRequest::new("Linen Shirt", -1.0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_negative_variant_quantity() {
        let request = CreateProductRequest::new("Linen Shirt", 49.9).with_variant(5, 2, -3);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_validates_only_present_fields() {
        let request = UpdateProductRequest {
            price: Some(59.9),
            ..Default::default()
        };
        assert!(request.validate().is_ok());

        let request = UpdateProductRequest {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
