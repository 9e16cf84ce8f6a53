use crate::launch::LaunchError;
use crate::web::{AppState, templates};
use axum::Json;
use axum::extract::{Path as UrlPath, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use std::error::Error;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct LaunchResponse {
    status: &'static str,
    message: &'static str,
    title: String,
}

pub async fn index_handler(State(state): State<AppState>) -> Response {
    let rendered = state
        .catalog
        .sorted_view(|catalog| templates::render_index(&state.templates, catalog));
    match rendered {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            let detail = describe(&err);
            warn!(error = %detail, "index render failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering template: {detail}"),
            )
                .into_response()
        }
    }
}

pub async fn launch_handler(
    State(state): State<AppState>,
    UrlPath(raw_id): UrlPath<String>,
) -> Response {
    debug!(raw_id = %raw_id, "launch request");
    let Ok(number) = raw_id.parse::<i64>() else {
        return (StatusCode::BAD_REQUEST, "Invalid launch ID").into_response();
    };
    // Negative ids are well-formed integers that can never match an entry.
    let Ok(id) = usize::try_from(number) else {
        return not_found(number);
    };

    let plan = match state.catalog.resolve(id) {
        Ok(plan) => plan,
        Err(err) => return launch_failure(err),
    };

    let dispatcher = state.dispatcher.clone();
    match tokio::task::spawn_blocking(move || dispatcher.spawn(plan)).await {
        Ok(Ok(started)) => Json(LaunchResponse {
            status: "success",
            message: "Game launched successfully",
            title: started.title,
        })
        .into_response(),
        Ok(Err(err)) => launch_failure(err),
        Err(join_err) => {
            warn!(error = %join_err, "launch task did not complete");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to launch game: {join_err}"),
            )
                .into_response()
        }
    }
}

pub async fn static_handler(
    State(state): State<AppState>,
    UrlPath(relative): UrlPath<String>,
) -> Response {
    let Some(path) = static_path(&state.static_dir, &relative) else {
        debug!(path = %relative, "rejected static path");
        return StatusCode::NOT_FOUND.into_response();
    };
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response(),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "static file unavailable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

fn not_found(id: impl std::fmt::Display) -> Response {
    warn!(%id, "launch id not found");
    (StatusCode::NOT_FOUND, "Game not found").into_response()
}

fn launch_failure(err: LaunchError) -> Response {
    if let LaunchError::NotFound(id) = err {
        return not_found(id);
    }
    let detail = describe(&err);
    warn!(error = %detail, "failed to launch game");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to launch game: {detail}"),
    )
        .into_response()
}

/// Join an error and its sources with `": "`.
fn describe(err: &dyn Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// Join `relative` onto `root` only if it is a plain downward path.
fn static_path(root: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative);
    let mut components = relative.components().peekable();
    components.peek()?;
    if components.all(|c| matches!(c, Component::Normal(_))) {
        Some(root.join(relative))
    } else {
        None
    }
}

fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
