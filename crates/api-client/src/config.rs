//! Configuration for the Velora API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default production API URL
const DEFAULT_API_URL: &str = "https://api.velora.shop/api/v1";

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development backend
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Self::Production
    }
}

impl Environment {
    /// Parse from environment variable
    #[must_use]
    pub fn from_env() -> Self {
        match env::var("VELORA_ENV")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for the back-office REST API
    pub base_url: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `VELORA_API_URL`: Base URL for the back-office API
    /// - `VELORA_ENV`: Environment (development/staging/production)
    /// - `VELORA_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let environment = Environment::from_env();

        let base_url = env::var("VELORA_API_URL").unwrap_or_else(|_| match environment {
            Environment::Development => "http://localhost:8080/api/v1".to_string(),
            Environment::Staging | Environment::Production => DEFAULT_API_URL.to_string(),
        });

        let timeout = env::var("VELORA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map_or(Duration::from_secs(30), Duration::from_secs);

        Ok(Self {
            base_url,
            timeout,
            environment,
        })
    }

    /// Create development configuration (local backend)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            timeout: Duration::from_secs(10),
            environment: Environment::Development,
        }
    }

    /// Create staging configuration
    #[must_use]
    pub fn staging() -> Self {
        Self {
            base_url: env::var("VELORA_STAGING_API_URL")
                .unwrap_or_else(|_| "https://staging-api.velora.shop/api/v1".to_string()),
            timeout: Duration::from_secs(30),
            environment: Environment::Staging,
        }
    }

    /// Create production configuration
    #[must_use]
    pub fn production() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            environment: Environment::Production,
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config(
                "base_url must start with http:// or https://",
            ));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.base_url.contains("velora.shop"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_development_config() {
        let config = ClientConfig::development();
        assert!(config.base_url.contains("localhost"));
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("https://test.velora.shop/api/v1")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.base_url, "https://test.velora.shop/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_validation() {
        let valid = ClientConfig::default();
        assert!(valid.validate().is_ok());

        let invalid = ClientConfig::default().with_base_url("");
        assert!(invalid.validate().is_err());

        let invalid = ClientConfig::default().with_base_url("ftp://velora.shop");
        assert!(invalid.validate().is_err());
    }
}
