//! Blog commands

use super::{authenticated, confirm_or_bail, fmt_date, print_json, truncate};
use anyhow::Result;
use clap::Subcommand;
use velora_core::error::ResultExt;
use velora_api_client::endpoints::blogs::BlogRequest;
use velora_api_client::PageQuery;
use velora_cli::output::{pagination_footer, Status, Table};

/// Blog subcommands
#[derive(Subcommand)]
pub enum BlogAction {
    /// List blog posts
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

    /// Show one blog post
    Get {
        /// Blog post ID
        id: i64,
    },

    /// Create a blog post
    Create {
        /// Title
        #[arg(short, long)]
        title: String,

        /// Body text; use --content-file for longer posts
        #[arg(short, long, conflicts_with = "content_file")]
        content: Option<String>,

        /// Read the body from a file
        #[arg(long)]
        content_file: Option<String>,

        /// Thumbnail image URL
        #[arg(long)]
        thumbnail: Option<String>,
    },

    /// Update a blog post
    Update {
        /// Blog post ID
        id: i64,

        /// Title
        #[arg(short, long)]
        title: String,

        /// Body text; use --content-file for longer posts
        #[arg(short, long, conflicts_with = "content_file")]
        content: Option<String>,

        /// Read the body from a file
        #[arg(long)]
        content_file: Option<String>,

        /// Thumbnail image URL
        #[arg(long)]
        thumbnail: Option<String>,
    },

    /// Delete a blog post
    Delete {
        /// Blog post ID
        id: i64,

        /// Skip the confirmation requirement
        #[arg(long)]
        yes: bool,
    },
}

/// Dispatch a blog subcommand
pub async fn run(action: BlogAction, format: &str) -> Result<()> {
    let (client, _, _) = authenticated().await?;
    let blogs = client.blogs();

    match action {
        BlogAction::List { page, size, search } => {
            let mut query = PageQuery::new().with_page(page).with_size(size);
            if let Some(search) = search {
                query = query.with_search(search);
            }
            let result = blogs.list(&query).await?;

            if format == "json" {
                return print_json(&result);
            }

            let mut table = Table::new(&["ID", "TITLE", "CREATED", "UPDATED"]);
            for blog in &result.content {
                table.add_row(vec![
                    blog.id.to_string(),
                    truncate(&blog.title, 50),
                    fmt_date(blog.audit.created_at),
                    fmt_date(blog.audit.updated_at),
                ]);
            }

            println!();
            table.print();
            pagination_footer(result.page, result.total_pages, result.total_elements);
            println!();
        }

        BlogAction::Get { id } => {
            let blog = blogs.get(id).await?;
            if format == "json" {
                return print_json(&blog);
            }
            println!();
            println!("  #{} {}", blog.id, blog.title);
            println!();
            println!("{}", blog.content);
            println!();
        }

        BlogAction::Create {
            title,
            content,
            content_file,
            thumbnail,
        } => {
            let body = resolve_content(content, content_file)?;
            let mut request = BlogRequest::new(title, body);
            if let Some(thumbnail) = thumbnail {
                request = request.with_thumbnail(thumbnail);
            }

            let blog = blogs.create(&request).await?;
            if format == "json" {
                return print_json(&blog);
            }
            Status::success(&format!("Created blog #{} \"{}\"", blog.id, blog.title));
        }

        BlogAction::Update {
            id,
            title,
            content,
            content_file,
            thumbnail,
        } => {
            let body = resolve_content(content, content_file)?;
            let mut request = BlogRequest::new(title, body);
            if let Some(thumbnail) = thumbnail {
                request = request.with_thumbnail(thumbnail);
            }

            let blog = blogs.update(id, &request).await?;
            if format == "json" {
                return print_json(&blog);
            }
            Status::success(&format!("Updated blog #{}", blog.id));
        }

        BlogAction::Delete { id, yes } => {
            confirm_or_bail(yes, &format!("blog #{id}"))?;
            blogs.delete(id).await?;
            if format == "json" {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            Status::success(&format!("Deleted blog #{id}"));
        }
    }

    Ok(())
}

/// Take the body from the flag or from a file
fn resolve_content(content: Option<String>, content_file: Option<String>) -> Result<String> {
    match (content, content_file) {
        (Some(content), _) => Ok(content),
        (None, Some(path)) => {
            let body = std::fs::read_to_string(&path)
                .map_err(velora_core::Error::from)
                .context(format!("While reading {path}"))
                .with_suggestion("Check the path, or pass the body inline with --content")?;
            Ok(body)
        }
        (None, None) => {
            Err(velora_core::Error::validation("Provide --content or --content-file").into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_content_prefers_inline() {
        let body = resolve_content(Some("hello".to_string()), None).unwrap();
        assert_eq!(body, "hello");
    }

    #[test]
    fn test_resolve_content_requires_one_source() {
        assert!(resolve_content(None, None).is_err());
    }

    #[test]
    fn test_resolve_content_reads_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("velora-admin-blog-test.md");
        std::fs::write(&path, "from file").unwrap();

        let body = resolve_content(None, Some(path.to_string_lossy().into_owned())).unwrap();
        assert_eq!(body, "from file");

        let _ = std::fs::remove_file(&path);
    }
}
