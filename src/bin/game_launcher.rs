//! Game launcher service.
//!
//! Loads the catalog once (a missing or malformed catalog aborts startup),
//! then serves the browser page and launch endpoint until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use game_launcher::{
    AppState, Catalog, JsonFile, LauncherArgs, LauncherConfig, init_tracing, load_templates, serve,
};
use tokio::net::TcpListener;
use tracing::info;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = LauncherConfig::from_args(LauncherArgs::parse())?;
    init_tracing(config.log_format);
    info!(
        catalog = %config.catalog_path.display(),
        static_dir = %config.static_dir.display(),
        "starting game launcher"
    );

    let catalog = Catalog::build(&JsonFile::new(&config.catalog_path))
        .context("error loading game list")?;
    let templates = load_templates(&config.static_dir)?;
    let state = AppState::new(catalog, templates, config.static_dir.clone());

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(async move {
        let listener = TcpListener::bind(config.addr)
            .await
            .with_context(|| format!("binding {}", config.addr))?;
        serve(listener, state).await
    })
}
