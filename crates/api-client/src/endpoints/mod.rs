//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one backend resource.
//!
//! ## Mapping to the back-office REST API
//!
//! | Module | Endpoints | Description |
//! |--------|-----------|-------------|
//! | `auth` | `/auth/login`, `/auth/refresh-token`, `/auth/me` | Session lifecycle |
//! | `categories` | `/categories` | Product category CRUD |
//! | `colors` | `/colors` | Color CRUD |
//! | `sizes` | `/sizes` | Size CRUD with fitting bands |
//! | `products` | `/products` | Product CRUD with images and variants |
//! | `users` | `/users` | Customer administration |
//! | `blogs` | `/blogs` | Blog post CRUD |
//! | `chat` | `/conversations`, `/messages` | Messaging panel |
//! | `images` | `/images/upload`, `/images/upload/batch` | Image upload |
//! | `settings` | `/system-settings` | Store-wide settings |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod auth;
pub mod blogs;
pub mod categories;
pub mod chat;
pub mod colors;
pub mod images;
pub mod products;
pub mod settings;
pub mod sizes;
pub mod users;

pub use auth::AuthApi;
pub use blogs::BlogsApi;
pub use categories::CategoriesApi;
pub use chat::ChatApi;
pub use colors::ColorsApi;
pub use images::ImagesApi;
pub use products::ProductsApi;
pub use settings::SettingsApi;
pub use sizes::SizesApi;
pub use users::UsersApi;

/// Audit fields carried by back-office records
///
/// All fields are optional; list projections may omit them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    /// When the record was created
    pub created_at: Option<DateTime<Utc>>,
    /// When the record was last updated
    pub updated_at: Option<DateTime<Utc>>,
    /// Who created the record
    pub created_by: Option<String>,
    /// Who last updated the record
    pub updated_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_camel_case_wire_format() {
        let json = r#"{
            "createdAt": "2026-08-06T10:15:00Z",
            "createdBy": "ops@velora.shop"
        }"#;

        let audit: Audit = serde_json::from_str(json).unwrap();
        assert!(audit.created_at.is_some());
        assert_eq!(audit.created_by.as_deref(), Some("ops@velora.shop"));
        assert!(audit.updated_at.is_none());
    }
}
