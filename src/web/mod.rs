//! HTTP shell around the catalog and the dispatcher.
//!
//! Routes:
//! - `GET /` renders the index template over the re-sorted catalog
//! - `GET /launch/:id` starts the entry with that launch id
//! - `GET /static/*path` serves files from the static directory

pub mod handlers;
pub mod templates;

use crate::catalog::{Catalog, SharedCatalog};
use crate::launch::{Dispatcher, OsSpawner, Spawner};
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use std::path::PathBuf;
use std::sync::Arc;
use tera::Tera;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub use templates::{INDEX_TEMPLATE, load_templates, render_index};

#[derive(Clone)]
pub struct AppState {
    pub catalog: SharedCatalog,
    pub dispatcher: Dispatcher<Arc<dyn Spawner>>,
    pub templates: Arc<Tera>,
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    /// State that launches through the platform's detached spawner.
    pub fn new(catalog: Catalog, templates: Tera, static_dir: PathBuf) -> Self {
        Self {
            catalog: SharedCatalog::new(catalog),
            dispatcher: Dispatcher::with_spawner(Arc::new(OsSpawner)),
            templates: Arc::new(templates),
            static_dir: Arc::new(static_dir),
        }
    }

    pub fn with_spawner(mut self, spawner: Arc<dyn Spawner>) -> Self {
        self.dispatcher = Dispatcher::with_spawner(spawner);
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/launch/:id", get(handlers::launch_handler))
        .route("/static/*path", get(handlers::static_handler))
        .with_state(state)
}

/// Serve until SIGINT/SIGTERM (Ctrl-C elsewhere).
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr().context("reading listener address")?;
    info!(%addr, "game launcher listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("web server failed")
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("unable to register signal handlers; falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutdown signal received");
}
