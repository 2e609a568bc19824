//! Size commands

use super::{authenticated, confirm_or_bail, print_json, truncate};
use anyhow::Result;
use clap::Subcommand;
use velora_api_client::endpoints::sizes::SizeRequest;
use velora_api_client::PageQuery;
use velora_cli::output::{pagination_footer, Status, Table};

/// Size subcommands
#[derive(Subcommand)]
pub enum SizeAction {
    /// List sizes
    List {
        /// Zero-based page index
        #[arg(short, long, default_value = "0")]
        page: u32,

        /// Page size
        #[arg(short, long, default_value = "20")]
        size: u32,
    },

    /// Show one size
    Get {
        /// Size ID
        id: i64,
    },

    /// Create a size
    Create {
        /// Label (S, M, XL, ...)
        #[arg(short, long)]
        name: String,

        /// Minimum fitting height in cm
        #[arg(long)]
        min_height: f64,

        /// Maximum fitting height in cm
        #[arg(long)]
        max_height: f64,

        /// Minimum fitting weight in kg
        #[arg(long)]
        min_weight: f64,

        /// Maximum fitting weight in kg
        #[arg(long)]
        max_weight: f64,
    },

    /// Update a size
    Update {
        /// Size ID
        id: i64,

        /// Label (S, M, XL, ...)
        #[arg(short, long)]
        name: String,

        /// Minimum fitting height in cm
        #[arg(long)]
        min_height: f64,

        /// Maximum fitting height in cm
        #[arg(long)]
        max_height: f64,

        /// Minimum fitting weight in kg
        #[arg(long)]
        min_weight: f64,

        /// Maximum fitting weight in kg
        #[arg(long)]
        max_weight: f64,
    },

    /// Delete a size
    Delete {
        /// Size ID
        id: i64,

        /// Skip the confirmation requirement
        #[arg(long)]
        yes: bool,
    },
}

/// Dispatch a size subcommand
pub async fn run(action: SizeAction, format: &str) -> Result<()> {
    let (client, _, _) = authenticated().await?;
    let sizes = client.sizes();

    match action {
        SizeAction::List { page, size } => {
            let query = PageQuery::new().with_page(page).with_size(size);
            let result = sizes.list(&query).await?;

            if format == "json" {
                return print_json(&result);
            }

            let mut table = Table::new(&["ID", "NAME", "HEIGHT (CM)", "WEIGHT (KG)"]);
            for item in &result.content {
                table.add_row(vec![
                    item.id.to_string(),
                    truncate(&item.name, 10),
                    format!("{:.0}–{:.0}", item.min_height, item.max_height),
                    format!("{:.0}–{:.0}", item.min_weight, item.max_weight),
                ]);
            }

            println!();
            table.print();
            pagination_footer(result.page, result.total_pages, result.total_elements);
            println!();
        }

        SizeAction::Get { id } => {
            let item = sizes.get(id).await?;
            if format == "json" {
                return print_json(&item);
            }
            println!();
            println!(
                "  #{} {}  height {:.0}–{:.0} cm, weight {:.0}–{:.0} kg",
                item.id, item.name, item.min_height, item.max_height, item.min_weight,
                item.max_weight
            );
            println!();
        }

        SizeAction::Create {
            name,
            min_height,
            max_height,
            min_weight,
            max_weight,
        } => {
            let request =
                SizeRequest::new(name, (min_height, max_height), (min_weight, max_weight));
            let item = sizes.create(&request).await?;
            if format == "json" {
                return print_json(&item);
            }
            Status::success(&format!("Created size #{} \"{}\"", item.id, item.name));
        }

        SizeAction::Update {
            id,
            name,
            min_height,
            max_height,
            min_weight,
            max_weight,
        } => {
            let request =
                SizeRequest::new(name, (min_height, max_height), (min_weight, max_weight));
            let item = sizes.update(id, &request).await?;
            if format == "json" {
                return print_json(&item);
            }
            Status::success(&format!("Updated size #{}", item.id));
        }

        SizeAction::Delete { id, yes } => {
            confirm_or_bail(yes, &format!("size #{id}"))?;
            sizes.delete(id).await?;
            if format == "json" {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            Status::success(&format!("Deleted size #{id}"));
        }
    }

    Ok(())
}
