//! Authentication endpoints
//!
//! Maps to `/auth/*`:
//! - `login` exchanges credentials for a token pair plus the profile
//! - `refresh` rotates the token pair (single-flighted by the client)
//! - `me` fetches the profile for the current session

use super::users::User;
use crate::client::AdminClient;
use crate::error::ApiResult;
use crate::store::TokenPair;
use serde::{Deserialize, Serialize};

/// Authentication API interface
#[derive(Clone)]
pub struct AuthApi {
    client: AdminClient,
}

impl AuthApi {
    /// Create a new auth API interface
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token pair
    ///
    /// POST /auth/login
    ///
    /// The returned pair is *not* persisted here; use
    /// [`AuthSession::login`](crate::session::AuthSession::login) for the
    /// full sign-in flow.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginData> {
        self.client
            .post(
                "auth/login",
                &LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .await
    }

    /// Rotate the stored token pair
    ///
    /// POST /auth/refresh-token
    ///
    /// Shares the client's single-flight gate: concurrent callers produce
    /// one backend call. Success persists the new pair; failure clears the
    /// store and is terminal for the session.
    pub async fn refresh(&self) -> ApiResult<TokenPair> {
        self.client.refresh_session().await
    }

    /// Fetch the profile for the current session
    ///
    /// GET /auth/me
    pub async fn me(&self) -> ApiResult<User> {
        self.client.get("auth/me").await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Successful login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    /// Short-lived bearer credential
    pub access_token: String,
    /// Longer-lived rotation credential
    pub refresh_token: String,
    /// Profile of the signed-in user
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_format() {
        let req = LoginRequest {
            email: "ops@velora.shop".to_string(),
            password: "secret".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"email\""));
        assert!(json.contains("\"password\""));
    }

    #[test]
    fn test_login_data_deserialize() {
        let json = r#"{
            "accessToken": "acc-1",
            "refreshToken": "ref-1",
            "user": {
                "id": 1,
                "email": "ops@velora.shop",
                "fullName": "Ops",
                "role": "admin",
                "avatarUrl": null
            }
        }"#;

        let data: LoginData = serde_json::from_str(json).unwrap();
        assert_eq!(data.access_token, "acc-1");
        assert_eq!(data.user.role, "admin");
    }
}
