//! Session commands: login, logout, whoami

use super::{authenticated, client, print_json};
use anyhow::Result;
use owo_colors::OwoColorize;
use velora_cli::output::Status;

/// Sign in and persist the session
pub async fn login(email: &str, password: &str, format: &str) -> Result<()> {
    let client = client()?;
    let session = client.session();
    let user = session.login(email, password).await?;

    if format == "json" {
        return print_json(&user);
    }

    Status::success(&format!(
        "Signed in as {} ({})",
        user.full_name.as_deref().unwrap_or(&user.email),
        user.role
    ));
    Ok(())
}

/// Clear the persisted session
pub fn logout(format: &str) -> Result<()> {
    let client = client()?;
    client.session().logout()?;

    if format == "json" {
        return print_json(&serde_json::json!({ "loggedOut": true }));
    }

    Status::success("Signed out");
    Ok(())
}

/// Show the signed-in profile
pub async fn whoami(format: &str) -> Result<()> {
    let (_, _, user) = authenticated().await?;

    if format == "json" {
        return print_json(&user);
    }

    println!();
    println!("  {}  {}", "Email:".bold(), user.email);
    if let Some(ref name) = user.full_name {
        println!("  {}   {}", "Name:".bold(), name);
    }
    println!("  {}   {}", "Role:".bold(), user.role);
    println!();
    Ok(())
}
