//! Subcommand implementations
//!
//! Every authenticated command goes through [`authenticated`], the CLI analog
//! of the original route guard: restore the session from persisted tokens,
//! then refuse to proceed without one.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use velora_api_client::endpoints::users::User;
use velora_api_client::{AdminClient, ApiError, AuthSession};

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

/// Build a client from environment configuration
pub fn client() -> Result<AdminClient> {
    Ok(AdminClient::new()?)
}

/// Build a client and require a live session
///
/// Restores the session from the persisted token pair and fails with an
/// authentication error when none survives.
pub async fn authenticated() -> Result<(AdminClient, AuthSession, User)> {
    let client = client()?;
    let session = client.session();
    session.initialize().await?;
    let user = session.require_authenticated()?;
    Ok((client, session, user))
}

/// Refuse destructive operations unless `--yes` was passed
pub fn confirm_or_bail(yes: bool, what: &str) -> Result<()> {
    if yes {
        Ok(())
    } else {
        Err(ApiError::config(format!("Refusing to delete {what}; re-run with --yes")).into())
    }
}

/// Pretty-print a payload as JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(velora_core::Error::from)?;
    println!("{json}");
    Ok(())
}

/// Render an audit timestamp for table cells
pub fn fmt_date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

/// Shorten a cell to fit list output
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let head: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
