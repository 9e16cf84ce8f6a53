//! Local game browser.
//!
//! Builds an alphabetic [`Catalog`] of launchable titles from a JSON file,
//! serves it as one HTML page and starts the selected title as a detached
//! process. Binaries (`game-launcher`, `catalog-check`) are thin wrappers over
//! the modules re-exported here.

pub mod catalog;
pub mod config;
pub mod launch;
pub mod telemetry;
pub mod web;

pub use catalog::{
    Catalog, Category, DEFAULT_CATALOG_PATH, Entry, EntrySource, JsonFile, LaunchId, LoadError,
    Section, SharedCatalog, category_key, normalize, parse_entries,
};
pub use config::{LauncherArgs, LauncherConfig, LogFormat};
pub use launch::{
    CommandSpec, Dispatcher, LaunchError, LaunchPlan, OsSpawner, Spawner, Started, launch,
};
pub use telemetry::init_tracing;
pub use web::{AppState, build_router, load_templates, render_index, serve};
