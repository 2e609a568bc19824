//! Image upload commands

use super::{authenticated, print_json};
use anyhow::Result;
use clap::Subcommand;
use std::time::Instant;
use velora_api_client::endpoints::images::UploadFile;
use velora_cli::output::{format_count, format_duration, format_size, Status};
use velora_cli::progress;

/// Image subcommands
#[derive(Subcommand)]
pub enum ImageAction {
    /// Upload one or more images
    Upload {
        /// Paths of image files
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

/// Dispatch an image subcommand
pub async fn run(action: ImageAction, format: &str) -> Result<()> {
    let (client, _, _) = authenticated().await?;
    let images = client.images();

    match action {
        ImageAction::Upload { paths } => {
            let mut files = Vec::with_capacity(paths.len());
            for path in &paths {
                files.push(UploadFile::from_path(path)?);
            }

            let start = Instant::now();
            let uploaded = if files.len() == 1 {
                let file = &files[0];
                let pb = progress::spinner(&format!(
                    "Uploading {} ({})",
                    file.file_name,
                    format_size(file.len() as u64)
                ));
                let result = images.upload(file).await;
                match &result {
                    Ok(_) => progress::finish_success(&pb, "Uploaded"),
                    Err(_) => progress::finish_error(&pb, "Upload failed"),
                }
                vec![result?]
            } else {
                let pb = progress::upload_progress(files.len() as u64);
                let result = images.upload_batch(&files).await;
                match &result {
                    Ok(uploaded) => {
                        pb.set_position(uploaded.len() as u64);
                        progress::finish_success(&pb, "Uploaded");
                    }
                    Err(_) => progress::finish_error(&pb, "Upload failed"),
                }
                result?
            };

            if format == "json" {
                return print_json(&uploaded);
            }

            for image in &uploaded {
                println!(
                    "  {} → {}",
                    image.file_name.as_deref().unwrap_or("(unnamed)"),
                    image.url
                );
            }
            Status::success(&format!(
                "Uploaded {} in {}",
                format_count(uploaded.len(), "image", "images"),
                format_duration(start.elapsed())
            ));
        }
    }

    Ok(())
}
