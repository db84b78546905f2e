//! `saathi listing` and `saathi translate` -- product listing tools.

use std::path::Path;

use anyhow::Context;
use console::style;

use saathi_core::backend::ListingBackend;
use saathi_types::backend::{ImageUpload, ProductListing, TranslateRequest, TranslatedListing};

use crate::state::AppState;

/// Generate a listing from a description, category, and product photo.
pub async fn generate(
    state: &AppState,
    description: &str,
    category: &str,
    image_path: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(image_path)
        .await
        .with_context(|| format!("reading product photo {}", image_path.display()))?;
    let file_name = image_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "product.jpg".to_string());

    let spinner = working_spinner("generating listing...");
    let listing = state
        .backend()
        .generate_listing(description, category, ImageUpload { file_name, bytes })
        .await;
    spinner.finish_and_clear();
    let listing = listing?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }
    print_listing(&listing);
    Ok(())
}

/// Translate a listing's title and description.
pub async fn translate(
    state: &AppState,
    title: String,
    description: String,
    language: String,
    json: bool,
) -> anyhow::Result<()> {
    let request = TranslateRequest {
        title,
        description,
        language,
    };

    let spinner = working_spinner("translating...");
    let translated = state.backend().translate_listing(&request).await;
    spinner.finish_and_clear();
    let translated = translated?;

    if json {
        println!("{}", serde_json::to_string_pretty(&translated)?);
        return Ok(());
    }
    print_translated(&translated);
    Ok(())
}

fn print_listing(listing: &ProductListing) {
    println!();
    println!("  {}", style(&listing.title).cyan().bold());
    println!("  {}", style(&listing.category).dim());
    println!();
    println!("  {}", listing.description);
    if let Some(tags) = &listing.tags {
        println!();
        println!("  {} {}", style("Tags:").bold(), tags.join(", "));
    }
    if let Some(keywords) = &listing.seo_keywords {
        println!(
            "  {} {}",
            style("SEO keywords:").bold(),
            keywords.join(", ")
        );
    }
    println!();
}

fn print_translated(translated: &TranslatedListing) {
    println!();
    println!("  {}", style(&translated.title).cyan().bold());
    println!();
    println!("  {}", translated.description);
    println!();
}

fn working_spinner(message: &'static str) -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    if let Ok(template) =
        indicatif::ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(template);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}
