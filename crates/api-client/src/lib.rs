//! Authenticated API client for the Velora back-office backend
//!
//! This crate provides the typed HTTP client used by the Velora admin tools
//! to drive the back-office REST API: products, categories, colors, sizes,
//! customers, blogs, the messaging panel, image upload, and system settings.
//!
//! # Features
//!
//! - **Bearer authentication**: every request carries the persisted access
//!   token; 401 responses trigger a single transparent token refresh and one
//!   replay of the original request
//! - **Single-flight refresh**: concurrent requests that hit a 401 share one
//!   refresh call; the rest park in a queue and resume with the new token
//! - **Pluggable token storage**: in-memory for tests, a JSON file under the
//!   user config directory for real sessions
//! - **Environment-based configuration**: URLs and timeouts from environment
//!   variables
//! - **Request correlation**: unique request IDs for debugging
//!
//! # Example
//!
//! ```rust,no_run
//! use velora_api_client::{AdminClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AdminClient::new()?;
//!
//!     let session = client.session();
//!     session.login("ops@velora.shop", "hunter2").await?;
//!
//!     let page = client.products().list(&Default::default()).await?;
//!     println!("Got {} products", page.content.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod refresh;
pub mod session;
pub mod store;

pub use client::AdminClient;
pub use config::{ClientConfig, Environment};
pub use envelope::{ApiEnvelope, Page, PageQuery, SubError};
pub use error::{ApiError, ApiResult};
pub use session::AuthSession;
pub use store::{FileTokenStore, MemoryTokenStore, TokenPair, TokenStore};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::AdminClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{
        AuthApi, BlogsApi, CategoriesApi, ChatApi, ColorsApi, ImagesApi, ProductsApi,
        SettingsApi, SizesApi, UsersApi,
    };
    pub use crate::envelope::{ApiEnvelope, Page, PageQuery};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::session::AuthSession;
    pub use crate::store::{FileTokenStore, MemoryTokenStore, TokenPair, TokenStore};
}
