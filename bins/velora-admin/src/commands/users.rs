//! Customer administration commands

use super::{authenticated, confirm_or_bail, fmt_date, print_json, truncate};
use anyhow::Result;
use clap::Subcommand;
use velora_api_client::PageQuery;
use velora_cli::output::{pagination_footer, Status, Table};

/// Customer subcommands
#[derive(Subcommand)]
pub enum UserAction {
    /// List customers
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

    /// Show one customer
    Get {
        /// Customer ID
        id: i64,
    },

    /// Change a customer's role
    SetRole {
        /// Customer ID
        id: i64,

        /// New role (admin, staff, customer)
        role: String,
    },

    /// Delete a customer
    Delete {
        /// Customer ID
        id: i64,

        /// Skip the confirmation requirement
        #[arg(long)]
        yes: bool,
    },
}

/// Dispatch a customer subcommand
pub async fn run(action: UserAction, format: &str) -> Result<()> {
    let (client, _, _) = authenticated().await?;
    let users = client.users();

    match action {
        UserAction::List { page, size, search } => {
            let mut query = PageQuery::new().with_page(page).with_size(size);
            if let Some(search) = search {
                query = query.with_search(search);
            }
            let result = users.list(&query).await?;

            if format == "json" {
                return print_json(&result);
            }

            let mut table = Table::new(&["ID", "EMAIL", "NAME", "ROLE", "JOINED"]);
            for user in &result.content {
                table.add_row(vec![
                    user.id.to_string(),
                    truncate(&user.email, 35),
                    truncate(user.full_name.as_deref().unwrap_or("-"), 25),
                    user.role.clone(),
                    fmt_date(user.audit.created_at),
                ]);
            }

            println!();
            table.print();
            pagination_footer(result.page, result.total_pages, result.total_elements);
            println!();
        }

        UserAction::Get { id } => {
            let user = users.get(id).await?;
            if format == "json" {
                return print_json(&user);
            }
            println!();
            println!(
                "  #{} {} <{}> ({})",
                user.id,
                user.full_name.as_deref().unwrap_or("-"),
                user.email,
                user.role
            );
            println!();
        }

        UserAction::SetRole { id, role } => {
            let user = users.update_role(id, &role).await?;
            if format == "json" {
                return print_json(&user);
            }
            Status::success(&format!("User #{} is now {}", user.id, user.role));
        }

        UserAction::Delete { id, yes } => {
            confirm_or_bail(yes, &format!("user #{id}"))?;
            users.delete(id).await?;
            if format == "json" {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            Status::success(&format!("Deleted user #{id}"));
        }
    }

    Ok(())
}
