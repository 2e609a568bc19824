//! Category commands

use super::{authenticated, confirm_or_bail, fmt_date, print_json, truncate};
use crate::CrudAction;
use anyhow::Result;
use velora_api_client::endpoints::categories::CategoryRequest;
use velora_api_client::PageQuery;
use velora_cli::output::{pagination_footer, Status, Table};

/// Dispatch a category subcommand
pub async fn run(action: CrudAction, format: &str) -> Result<()> {
    match action {
        CrudAction::List { page, size, search } => list(page, size, search, format).await,
        CrudAction::Get { id } => get(id, format).await,
        CrudAction::Create { name, description } => create(&name, description, format).await,
        CrudAction::Update {
            id,
            name,
            description,
        } => update(id, &name, description, format).await,
        CrudAction::Delete { id, yes } => delete(id, yes, format).await,
    }
}

async fn list(page: u32, size: u32, search: Option<String>, format: &str) -> Result<()> {
    let (client, _, _) = authenticated().await?;

    let mut query = PageQuery::new().with_page(page).with_size(size);
    if let Some(search) = search {
        query = query.with_search(search);
    }
    let result = client.categories().list(&query).await?;

    if format == "json" {
        return print_json(&result);
    }

    let mut table = Table::new(&["ID", "NAME", "DESCRIPTION", "CREATED"]);
    for category in &result.content {
        table.add_row(vec![
            category.id.to_string(),
            truncate(&category.name, 30),
            truncate(category.description.as_deref().unwrap_or("-"), 40),
            fmt_date(category.audit.created_at),
        ]);
    }

    println!();
    table.print();
    pagination_footer(result.page, result.total_pages, result.total_elements);
    println!();
    Ok(())
}

async fn get(id: i64, format: &str) -> Result<()> {
    let (client, _, _) = authenticated().await?;
    let category = client.categories().get(id).await?;

    if format == "json" {
        return print_json(&category);
    }

    println!();
    println!("  #{} {}", category.id, category.name);
    if let Some(ref description) = category.description {
        println!("  {description}");
    }
    println!("  created {}", fmt_date(category.audit.created_at));
    println!();
    Ok(())
}

async fn create(name: &str, description: Option<String>, format: &str) -> Result<()> {
    let (client, _, _) = authenticated().await?;

    let mut request = CategoryRequest::new(name);
    if let Some(description) = description {
        request = request.with_description(description);
    }
    let category = client.categories().create(&request).await?;

    if format == "json" {
        return print_json(&category);
    }
    Status::success(&format!("Created category #{} \"{}\"", category.id, category.name));
    Ok(())
}

async fn update(id: i64, name: &str, description: Option<String>, format: &str) -> Result<()> {
    let (client, _, _) = authenticated().await?;

    let mut request = CategoryRequest::new(name);
    if let Some(description) = description {
        request = request.with_description(description);
    }
    let category = client.categories().update(id, &request).await?;

    if format == "json" {
        return print_json(&category);
    }
    Status::success(&format!("Updated category #{}", category.id));
    Ok(())
}

async fn delete(id: i64, yes: bool, format: &str) -> Result<()> {
    confirm_or_bail(yes, &format!("category #{id}"))?;
    let (client, _, _) = authenticated().await?;
    client.categories().delete(id).await?;

    if format == "json" {
        return print_json(&serde_json::json!({ "deleted": id }));
    }
    Status::success(&format!("Deleted category #{id}"));
    Ok(())
}
