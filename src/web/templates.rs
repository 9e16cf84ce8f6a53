use crate::catalog::Catalog;
use anyhow::{Context, Result};
use std::path::Path;
use tera::Tera;
use tracing::{debug, info};

/// Name of the page template; the `.html` suffix turns on autoescaping.
pub const INDEX_TEMPLATE: &str = "index.html";

const BUNDLED_INDEX: &str = include_str!("../../static/index.html");

/// Load `<static_dir>/index.html`, or the bundled page when the directory has
/// none. A template that exists but does not compile is an error.
pub fn load_templates(static_dir: &Path) -> Result<Tera> {
    let mut tera = Tera::default();
    let path = static_dir.join(INDEX_TEMPLATE);
    if path.is_file() {
        tera.add_template_file(&path, Some(INDEX_TEMPLATE))
            .with_context(|| format!("compiling template {}", path.display()))?;
        info!(path = %path.display(), "loaded index template");
    } else {
        tera.add_raw_template(INDEX_TEMPLATE, BUNDLED_INDEX)
            .context("compiling bundled index template")?;
        debug!(dir = %static_dir.display(), "no index template on disk; using bundled page");
    }
    Ok(tera)
}

/// Render the index page. The template sees `sections` (each category with
/// its own entries), plus the flat `categories`, `games` and `total`.
pub fn render_index(tera: &Tera, catalog: &Catalog) -> tera::Result<String> {
    let mut context = tera::Context::new();
    context.insert("sections", &catalog.sections());
    context.insert("categories", catalog.categories());
    context.insert("games", catalog.entries());
    context.insert("total", &catalog.len());
    tera.render(INDEX_TEMPLATE, &context)
}
