use std::path::PathBuf;

use clap::Subcommand;
use serde_json::json;

use crate::cli::config::api_client;
use crate::cli::utils::{output_empty_collection, output_success, read_stdin_json};
use crate::cli::OutputFormat;
use crate::models::{ProductDraft, ProductQuery, StockStatus};
use crate::services::ProductService;

#[derive(Subcommand)]
pub enum ProductCommands {
    #[command(about = "List products")]
    List {
        #[arg(long, default_value = "", help = "Search text")]
        search: String,
        #[arg(long, default_value_t = 1, help = "Page number")]
        page: u32,
        #[arg(long, default_value_t = 10, help = "Products per page")]
        limit: u32,
        #[arg(long, help = "Return every product, ignoring paging")]
        all: bool,
    },

    #[command(about = "Show one product")]
    Get {
        #[arg(help = "Product ID")]
        id: String,
    },

    #[command(about = "Create a product from JSON on stdin")]
    Add,

    #[command(about = "Delete a product")]
    Delete {
        #[arg(help = "Product ID")]
        id: String,
    },

    #[command(about = "Upload a file as multipart form data")]
    Upload {
        #[arg(help = "Admin API endpoint, e.g. /products/upload")]
        endpoint: String,
        #[arg(help = "File to upload")]
        file: PathBuf,
        #[arg(long, default_value = "images", help = "Form field name")]
        field: String,
    },
}

pub async fn handle(cmd: ProductCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let service = ProductService::new(api_client()?);

    match cmd {
        ProductCommands::List { search, page, limit, all } => {
            let query = ProductQuery { search, page, limit, all };
            let result = service.list(&query).await?;

            if result.products.is_empty() {
                return output_empty_collection(&output_format, "products", "No products found");
            }

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                OutputFormat::Text => {
                    println!("Showing {} of {} products", result.products.len(), result.total);
                    for product in &result.products {
                        let status = match product.stock_status() {
                            StockStatus::Active => "Active",
                            StockStatus::OutOfStock => "Out of Stock",
                        };
                        println!(
                            "{:<26} {:<32} {:>10.2} {:>6} {}",
                            product.id,
                            product.name,
                            product.effective_price(),
                            product.stock,
                            status
                        );
                    }
                }
            }
            Ok(())
        }
        ProductCommands::Get { id } => {
            let product = service.get(&id).await?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&product)?),
                OutputFormat::Text => {
                    println!("{} ({})", product.name, product.id);
                    println!("Brand: {}", product.brand);
                    println!("Price: {:.2} (list {:.2})", product.effective_price(), product.price);
                    println!("Stock: {}", product.stock);
                    if !product.description.is_empty() {
                        println!("Description: {}", product.description);
                    }
                }
            }
            Ok(())
        }
        ProductCommands::Add => {
            let draft: ProductDraft = read_stdin_json()?;
            let name = draft.name.clone();
            let message = service.add(draft).await?;
            output_success(&output_format, &message, Some(json!({ "name": name })))
        }
        ProductCommands::Delete { id } => {
            let message = service.delete(&id).await?;
            output_success(&output_format, &message, Some(json!({ "id": id })))
        }
        ProductCommands::Upload { endpoint, file, field } => {
            let bytes = tokio::fs::read(&file).await?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());

            let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
            let form = reqwest::multipart::Form::new().part(field, part);

            let data = service.upload(&endpoint, form).await?;
            output_success(&output_format, "Upload complete", Some(data))
        }
    }
}
