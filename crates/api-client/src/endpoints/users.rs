//! Customer administration endpoints
//!
//! Maps to `/users`:
//! - List customers with pagination and search
//! - Get a single customer
//! - Change a customer's role
//! - Delete a customer

use super::Audit;
use crate::client::AdminClient;
use crate::envelope::{Page, PageQuery};
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use velora_core::validation::Validator;

/// Roles a back-office account can hold
pub const ROLES: &[&str] = &["admin", "staff", "customer"];

/// Users API interface
#[derive(Clone)]
pub struct UsersApi {
    client: AdminClient,
}

impl UsersApi {
    /// Create a new users API interface
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List customers with pagination
    ///
    /// GET /users
    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<User>> {
        let path = format!("users?{}", query.to_query());
        self.client.get(&path).await
    }

    /// Get a single customer by ID
    ///
    /// GET /users/{id}
    pub async fn get(&self, id: i64) -> ApiResult<User> {
        self.client.get(&format!("users/{id}")).await
    }

    /// Change a customer's role
    ///
    /// PUT /users/{id}/role
    pub async fn update_role(&self, id: i64, role: &str) -> ApiResult<User> {
        let validation = Validator::new().one_of("role", role, ROLES).validate();
        if !validation.is_valid() {
            return Err(validation.into());
        }

        self.client
            .put(
                &format!("users/{id}/role"),
                &UpdateRoleRequest {
                    role: role.to_string(),
                },
            )
            .await
    }

    /// Delete a customer
    ///
    /// DELETE /users/{id}
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("users/{id}")).await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Back-office user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier
    pub id: i64,
    /// Login email
    pub email: String,
    /// Display name
    pub full_name: Option<String>,
    /// Account role (`admin`, `staff`, `customer`)
    pub role: String,
    /// Avatar image URL
    pub avatar_url: Option<String>,
    /// Audit fields
    #[serde(flatten)]
    pub audit: Audit,
}

/// Role change request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    /// New role
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialize() {
        let json = r#"{
            "id": 12,
            "email": "jane@velora.shop",
            "fullName": "Jane Doe",
            "role": "staff",
            "avatarUrl": null,
            "createdAt": "2026-08-06T10:15:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 12);
        assert_eq!(user.role, "staff");
        assert_eq!(user.full_name.as_deref(), Some("Jane Doe"));
        assert!(user.audit.created_at.is_some());
    }

    #[test]
    fn test_roles_cover_backend_set() {
        assert!(ROLES.contains(&"admin"));
        assert!(ROLES.contains(&"customer"));
    }
}
