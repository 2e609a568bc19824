//! Messaging panel commands

use super::{authenticated, print_json, truncate};
use anyhow::Result;
use clap::Subcommand;
use owo_colors::OwoColorize;
use velora_api_client::PageQuery;
use velora_cli::output::{pagination_footer, Status, Table};

/// Chat subcommands
#[derive(Subcommand)]
pub enum ChatAction {
    /// List customer conversations
    Conversations {
        /// Zero-based page index
        #[arg(short, long, default_value = "0")]
        page: u32,

        /// Page size
        #[arg(short, long, default_value = "20")]
        size: u32,
    },

    /// Show messages in a conversation
    Messages {
        /// Conversation ID
        conversation_id: i64,

        /// Zero-based page index
        #[arg(short, long, default_value = "0")]
        page: u32,

        /// Page size
        #[arg(short, long, default_value = "50")]
        size: u32,

        /// Mark the conversation as seen afterwards
        #[arg(long)]
        seen: bool,
    },

    /// Send a message into a conversation
    Send {
        /// Conversation ID
        conversation_id: i64,

        /// Message text
        content: String,
    },
}

/// Dispatch a chat subcommand
pub async fn run(action: ChatAction, format: &str) -> Result<()> {
    let (client, _, me) = authenticated().await?;
    let chat = client.chat();

    match action {
        ChatAction::Conversations { page, size } => {
            let query = PageQuery::new().with_page(page).with_size(size);
            let result = chat.conversations(&query).await?;

            if format == "json" {
                return print_json(&result);
            }

            let mut table = Table::new(&["ID", "CUSTOMER", "UNREAD", "LAST MESSAGE"]);
            for conversation in &result.content {
                let last = conversation
                    .last_message
                    .as_ref()
                    .map_or("-".to_string(), |m| truncate(&m.content, 40));
                table.add_row(vec![
                    conversation.id.to_string(),
                    truncate(
                        conversation
                            .customer
                            .full_name
                            .as_deref()
                            .unwrap_or(&conversation.customer.email),
                        30,
                    ),
                    conversation.unread_count.to_string(),
                    last,
                ]);
            }

            println!();
            table.print();
            pagination_footer(result.page, result.total_pages, result.total_elements);
            println!();
        }

        ChatAction::Messages {
            conversation_id,
            page,
            size,
            seen,
        } => {
            let query = PageQuery::new().with_page(page).with_size(size);
            let result = chat.messages(conversation_id, &query).await?;

            if format == "json" {
                if seen {
                    chat.mark_seen(conversation_id).await?;
                }
                return print_json(&result);
            }

            println!();
            for message in &result.content {
                let time = message.sent_at.format("%Y-%m-%d %H:%M");
                if message.sender_id == me.id {
                    println!("  {} {}", format!("[{time}] you:").dimmed(), message.content);
                } else {
                    println!(
                        "  {} {}",
                        format!("[{time}] #{}:", message.sender_id).blue(),
                        message.content
                    );
                }
            }
            pagination_footer(result.page, result.total_pages, result.total_elements);
            println!();

            if seen {
                chat.mark_seen(conversation_id).await?;
                Status::info("Conversation marked as seen");
            }
        }

        ChatAction::Send {
            conversation_id,
            content,
        } => {
            let message = chat.send(conversation_id, &content).await?;
            if format == "json" {
                return print_json(&message);
            }
            Status::success(&format!(
                "Sent message #{} to conversation #{}",
                message.id, message.conversation_id
            ));
        }
    }

    Ok(())
}
