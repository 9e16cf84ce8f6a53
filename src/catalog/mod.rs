//! Game catalog wiring.
//!
//! Raw entries come from an [`EntrySource`] (normally the `games.json` file
//! next to the service), are ordered by [`normalize`]d title and grouped into
//! one [`Category`] per leading letter. The resulting [`Catalog`] is built once
//! and shared with the web layer through [`SharedCatalog`].

pub mod builder;
pub mod model;
pub mod shared;
pub mod title;

pub use builder::{Catalog, Section};
pub use model::{Category, Entry, EntrySource, JsonFile, LaunchId, LoadError, parse_entries};
pub use shared::SharedCatalog;
pub use title::{category_key, normalize};

/// Default relative path to the catalog data file.
pub const DEFAULT_CATALOG_PATH: &str = "games.json";
