//! Color commands

use super::{authenticated, confirm_or_bail, fmt_date, print_json, truncate};
use anyhow::Result;
use clap::Subcommand;
use velora_api_client::endpoints::colors::ColorRequest;
use velora_api_client::PageQuery;
use velora_cli::output::{pagination_footer, Status, Table};

/// Color subcommands
#[derive(Subcommand)]
pub enum ColorAction {
    /// List colors
    List {
        /// Zero-based page index
        #[arg(short, long, default_value = "0")]
        page: u32,

        /// Page size
        #[arg(short, long, default_value = "20")]
        size: u32,

        /// Free-text search filter
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one color
    Get {
        /// Color ID
        id: i64,
    },

    /// Create a color
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Hex code (#RRGGBB)
        #[arg(short, long)]
        code: String,
    },

    /// Update a color
    Update {
        /// Color ID
        id: i64,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Hex code (#RRGGBB)
        #[arg(short, long)]
        code: String,
    },

    /// Delete a color
    Delete {
        /// Color ID
        id: i64,

        /// Skip the confirmation requirement
        #[arg(long)]
        yes: bool,
    },
}

/// Dispatch a color subcommand
pub async fn run(action: ColorAction, format: &str) -> Result<()> {
    let (client, _, _) = authenticated().await?;
    let colors = client.colors();

    match action {
        ColorAction::List { page, size, search } => {
            let mut query = PageQuery::new().with_page(page).with_size(size);
            if let Some(search) = search {
                query = query.with_search(search);
            }
            let result = colors.list(&query).await?;

            if format == "json" {
                return print_json(&result);
            }

            let mut table = Table::new(&["ID", "NAME", "CODE", "UPDATED"]);
            for color in &result.content {
                table.add_row(vec![
                    color.id.to_string(),
                    truncate(&color.name, 30),
                    color.code.clone(),
                    fmt_date(color.audit.updated_at),
                ]);
            }

            println!();
            table.print();
            pagination_footer(result.page, result.total_pages, result.total_elements);
            println!();
        }

        ColorAction::Get { id } => {
            let color = colors.get(id).await?;
            if format == "json" {
                return print_json(&color);
            }
            println!();
            println!("  #{} {} ({})", color.id, color.name, color.code);
            println!();
        }

        ColorAction::Create { name, code } => {
            let color = colors.create(&ColorRequest::new(name, code)).await?;
            if format == "json" {
                return print_json(&color);
            }
            Status::success(&format!("Created color #{} \"{}\"", color.id, color.name));
        }

        ColorAction::Update { id, name, code } => {
            let color = colors.update(id, &ColorRequest::new(name, code)).await?;
            if format == "json" {
                return print_json(&color);
            }
            Status::success(&format!("Updated color #{}", color.id));
        }

        ColorAction::Delete { id, yes } => {
            confirm_or_bail(yes, &format!("color #{id}"))?;
            colors.delete(id).await?;
            if format == "json" {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            Status::success(&format!("Deleted color #{id}"));
        }
    }

    Ok(())
}
