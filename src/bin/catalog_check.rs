//! Build a catalog from a data file and report what the service would show.
//!
//! Usage:
//!   catalog-check --file games.json
//!   catalog-check --file games.json --json

use anyhow::{Context, Result};
use clap::Parser;
use game_launcher::{Catalog, DEFAULT_CATALOG_PATH, JsonFile};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog-check")]
#[command(about = "Load a game catalog and print its categories and launch ids")]
struct Cli {
    /// Catalog JSON file.
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    file: PathBuf,
    /// Print the built catalog as JSON instead of a listing.
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let catalog = Catalog::build(&JsonFile::new(&cli.file))
        .with_context(|| format!("building catalog from {}", cli.file.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    for section in catalog.sections() {
        let label = if section.category.name.is_empty() {
            "(untitled)"
        } else {
            section.category.name.as_str()
        };
        println!("{label}");
        for entry in section.entries {
            println!("  {:>4}  {}  [{}]", entry.launch_id, entry.title, entry.exec);
        }
    }
    println!(
        "{} entries in {} categories",
        catalog.len(),
        catalog.categories().len()
    );
    Ok(())
}
