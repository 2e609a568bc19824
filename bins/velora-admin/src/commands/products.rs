//! Product commands

use super::{authenticated, confirm_or_bail, fmt_date, print_json, truncate};
use anyhow::Result;
use clap::Subcommand;
use velora_core::Error as CoreError;
use velora_api_client::endpoints::products::{
    CreateProductRequest, ProductVariant, UpdateProductRequest,
};
use velora_api_client::PageQuery;
use velora_cli::output::{pagination_footer, Status, Table};

/// Product subcommands
#[derive(Subcommand)]
pub enum ProductAction {
    /// List products
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

        /// Restrict to one category
        #[arg(short, long)]
        category: Option<i64>,
    },

    /// Show one product
    Get {
        /// Product ID
        id: i64,
    },

    /// Create a product
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Unit price
        #[arg(short, long)]
        price: f64,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Owning category ID
        #[arg(short, long)]
        category: Option<i64>,

        /// Image URL (repeatable)
        #[arg(long = "image")]
        images: Vec<String>,

        /// Variant as colorId:sizeId:quantity (repeatable)
        #[arg(long = "variant")]
        variants: Vec<String>,
    },

    /// Update a product; omitted flags leave fields unchanged
    Update {
        /// Product ID
        id: i64,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Unit price
        #[arg(short, long)]
        price: Option<f64>,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Owning category ID
        #[arg(short, long)]
        category: Option<i64>,

        /// Replacement variant list as colorId:sizeId:quantity (repeatable)
        #[arg(long = "variant")]
        variants: Vec<String>,
    },

    /// Delete a product
    Delete {
        /// Product ID
        id: i64,

        /// Skip the confirmation requirement
        #[arg(long)]
        yes: bool,
    },
}

/// Dispatch a product subcommand
pub async fn run(action: ProductAction, format: &str) -> Result<()> {
    let (client, _, _) = authenticated().await?;
    let products = client.products();

    match action {
        ProductAction::List {
            page,
            size,
            search,
            category,
        } => {
            let mut query = PageQuery::new().with_page(page).with_size(size);
            if let Some(search) = search {
                query = query.with_search(search);
            }
            let result = match category {
                Some(category_id) => products.list_by_category(category_id, &query).await?,
                None => products.list(&query).await?,
            };

            if format == "json" {
                return print_json(&result);
            }

            let mut table = Table::new(&["ID", "NAME", "PRICE", "VARIANTS", "CREATED"]);
            for product in &result.content {
                table.add_row(vec![
                    product.id.to_string(),
                    truncate(&product.name, 40),
                    format!("{:.2}", product.price),
                    product.variants.len().to_string(),
                    fmt_date(product.audit.created_at),
                ]);
            }

            println!();
            table.print();
            pagination_footer(result.page, result.total_pages, result.total_elements);
            println!();
        }

        ProductAction::Get { id } => {
            let product = products.get(id).await?;
            if format == "json" {
                return print_json(&product);
            }

            println!();
            println!("  #{} {}  {:.2}", product.id, product.name, product.price);
            if let Some(ref description) = product.description {
                println!("  {description}");
            }
            if !product.images.is_empty() {
                println!("  images:");
                for image in &product.images {
                    println!("    {}", image.url);
                }
            }
            if !product.variants.is_empty() {
                println!("  variants:");
                for variant in &product.variants {
                    println!(
                        "    color {} / size {}: {} in stock",
                        variant.color_id, variant.size_id, variant.quantity
                    );
                }
            }
            println!();
        }

        ProductAction::Create {
            name,
            price,
            description,
            category,
            images,
            variants,
        } => {
            let mut request = CreateProductRequest::new(name, price);
            if let Some(description) = description {
                request = request.with_description(description);
            }
            if let Some(category_id) = category {
                request = request.with_category(category_id);
            }
            for url in images {
                request = request.with_image(url);
            }
            request.variants = parse_variants(&variants)?;

            let product = products.create(&request).await?;
            if format == "json" {
                return print_json(&product);
            }
            Status::success(&format!(
                "Created product #{} \"{}\"",
                product.id, product.name
            ));
        }

        ProductAction::Update {
            id,
            name,
            price,
            description,
            category,
            variants,
        } => {
            let request = UpdateProductRequest {
                name,
                description,
                price,
                category_id: category,
                images: None,
                variants: if variants.is_empty() {
                    None
                } else {
                    Some(parse_variants(&variants)?)
                },
            };

            let product = products.update(id, &request).await?;
            if format == "json" {
                return print_json(&product);
            }
            Status::success(&format!("Updated product #{}", product.id));
        }

        ProductAction::Delete { id, yes } => {
            confirm_or_bail(yes, &format!("product #{id}"))?;
            products.delete(id).await?;
            if format == "json" {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            Status::success(&format!("Deleted product #{id}"));
        }
    }

    Ok(())
}

/// Parse `colorId:sizeId:quantity` variant specs
fn parse_variants(specs: &[String]) -> Result<Vec<ProductVariant>> {
    specs
        .iter()
        .map(|spec| {
            let parts: Vec<&str> = spec.split(':').collect();
            if parts.len() != 3 {
                return Err(CoreError::validation(format!("Invalid variant \"{spec}\""))
                    .with_suggestion("Use colorId:sizeId:quantity")
                    .into());
            }
            Ok(ProductVariant {
                color_id: parts[0]
                    .parse()
                    .map_err(|_| CoreError::validation(format!("Invalid color ID in \"{spec}\"")))?,
                size_id: parts[1]
                    .parse()
                    .map_err(|_| CoreError::validation(format!("Invalid size ID in \"{spec}\"")))?,
                quantity: parts[2]
                    .parse()
                    .map_err(|_| CoreError::validation(format!("Invalid quantity in \"{spec}\"")))?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        let variants = parse_variants(&["5:2:12".to_string(), "5:3:0".to_string()]).unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].color_id, 5);
        assert_eq!(variants[1].quantity, 0);
    }

    #[test]
    fn test_parse_variants_rejects_bad_shape() {
        assert!(parse_variants(&["5:2".to_string()]).is_err());
        assert!(parse_variants(&["a:b:c".to_string()]).is_err());
    }
}
