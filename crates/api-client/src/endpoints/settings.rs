//! System settings endpoints
//!
//! Maps to `/system-settings`: one store-wide settings record, read and
//! replaced as a whole.

use crate::client::AdminClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use velora_core::validation::{Validator, EMAIL_PATTERN};

/// Settings API interface
#[derive(Clone)]
pub struct SettingsApi {
    client: AdminClient,
}

impl SettingsApi {
    /// Create a new settings API interface
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// Fetch the settings record
    ///
    /// GET /system-settings
    pub async fn get(&self) -> ApiResult<SystemSettings> {
        self.client.get("system-settings").await
    }

    /// Replace the settings record
    ///
    /// PUT /system-settings
    pub async fn update(&self, settings: &SystemSettings) -> ApiResult<SystemSettings> {
        settings.validate()?;
        self.client.put("system-settings", settings).await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Store-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    /// Storefront display name
    pub store_name: String,
    /// Support contact shown to customers
    pub support_email: String,
    /// ISO 4217 currency code
    pub currency: String,
    /// When set, the storefront shows a maintenance page
    pub maintenance_mode: bool,
}

impl SystemSettings {
    fn validate(&self) -> ApiResult<()> {
        let result = Validator::new()
            .required("storeName", &self.store_name)
            .max_length("storeName", &self.store_name, 120)
            .pattern(
                "supportEmail",
                &self.support_email,
                EMAIL_PATTERN,
                "email format",
            )
            .pattern("currency", &self.currency, r"^[A-Z]{3}$", "ISO 4217 code")
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

    fn settings() -> SystemSettings {
        SystemSettings {
            store_name: "Velora".to_string(),
            support_email: "support@velora.shop".to_string(),
            currency: "EUR".to_string(),
            maintenance_mode: false,
        }
    }

    #[test]
    fn test_settings_roundtrip() {
        let json = serde_json::to_string(&settings()).unwrap();
        assert!(json.contains("storeName"));
        assert!(json.contains("maintenanceMode"));

        let parsed: SystemSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings());
    }

    #[test]
    fn test_settings_validation() {
        assert!(settings().validate().is_ok());

        let mut bad = settings();
        bad.currency = "euro".to_string();
        assert!(bad.validate().is_err());

        let mut bad = settings();
        bad.support_email = "not-an-email".to_string();
        assert!(bad.validate().is_err());
    }
}
