//! System settings commands

use super::{authenticated, print_json};
use anyhow::Result;
use clap::Subcommand;
use owo_colors::OwoColorize;
use velora_api_client::endpoints::settings::SystemSettings;
use velora_cli::output::Status;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show the current settings
    Show,

    /// Update settings; omitted flags keep their current values
    Update {
        /// Storefront display name
        #[arg(long)]
        store_name: Option<String>,

        /// Support contact email
        #[arg(long)]
        support_email: Option<String>,

        /// ISO 4217 currency code
        #[arg(long)]
        currency: Option<String>,

        /// Toggle the storefront maintenance page
        #[arg(long)]
        maintenance: Option<bool>,
    },
}

/// Dispatch a settings subcommand
pub async fn run(action: SettingsAction, format: &str) -> Result<()> {
    let (client, _, _) = authenticated().await?;
    let settings = client.settings();

    match action {
        SettingsAction::Show => {
            let current = settings.get().await?;
            if format == "json" {
                return print_json(&current);
            }
            print_settings(&current);
        }

        SettingsAction::Update {
            store_name,
            support_email,
            currency,
            maintenance,
        } => {
            // Read-modify-write: the backend replaces the record as a whole
            let mut current = settings.get().await?;
            if let Some(store_name) = store_name {
                current.store_name = store_name;
            }
            if let Some(support_email) = support_email {
                current.support_email = support_email;
            }
            if let Some(currency) = currency {
                current.currency = currency;
            }
            if let Some(maintenance) = maintenance {
                current.maintenance_mode = maintenance;
            }

            let updated = settings.update(&current).await?;
            if format == "json" {
                return print_json(&updated);
            }
            Status::success("Settings updated");
            print_settings(&updated);
        }
    }

    Ok(())
}

fn print_settings(settings: &SystemSettings) {
    println!();
    println!("  {}    {}", "Store:".bold(), settings.store_name);
    println!("  {}  {}", "Support:".bold(), settings.support_email);
    println!("  {} {}", "Currency:".bold(), settings.currency);
    println!(
        "  {} {}",
        "Maintenance:".bold(),
        if settings.maintenance_mode {
            "on".yellow().to_string()
        } else {
            "off".green().to_string()
        }
    );
    println!();
}
