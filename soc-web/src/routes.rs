//! Request handlers.
//!
//! Each request opens its own read-only connection on the blocking pool,
//! runs its queries one after another, and drops the connection before the
//! response is built. Static assets are read straight from `static_dir`.

use std::io;
use std::path::{Component, Path as FsPath};

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Json, Response};
use soc_db::{Connection, DbError, Row, StudyDetail};

use crate::error::WebError;
use crate::server::AppState;

/// `GET /index.html`
pub async fn index_html(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let studies = with_connection(&state, soc_db::list_studies).await?;
    Ok(Html(state.renderer.render_index(&studies)?))
}

/// `GET /study/{curated_study_number}.html`
pub async fn study_html(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Html<String>, WebError> {
    let Some(curated) = page.strip_suffix(".html") else {
        return Err(WebError::PageNotFound(format!("/study/{page}")));
    };
    let detail = load_study(&state, curated).await?;
    Ok(Html(state.renderer.render_study(&detail)?))
}

/// `GET /api/studies`
pub async fn api_studies(State(state): State<AppState>) -> Result<Json<Vec<Row>>, WebError> {
    let studies = with_connection(&state, soc_db::list_studies).await?;
    Ok(Json(studies))
}

/// `GET /api/study/{curated_study_number}`
pub async fn api_study(
    State(state): State<AppState>,
    Path(curated_study_number): Path<String>,
) -> Result<Json<StudyDetail>, WebError> {
    let detail = load_study(&state, &curated_study_number).await?;
    Ok(Json(detail))
}

/// `GET /static/{*path}`
///
/// Only plain relative paths are served. `..`, absolute paths and anything
/// else that could leave `static_dir` is answered with 404.
pub async fn static_asset(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, WebError> {
    let not_found = || WebError::PageNotFound(format!("/static/{path}"));

    let relative = FsPath::new(&path);
    let contained = !path.contains('\0')
        && relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if !contained {
        log::warn!("refusing static path {path:?}");
        return Err(not_found());
    }

    let file = state.static_dir.join(relative);
    let bytes = match tokio::fs::read(&file).await {
        Ok(bytes) => bytes,
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::IsADirectory) => {
            return Err(not_found());
        }
        Err(e) => return Err(e.into()),
    };
    Ok(([(header::CONTENT_TYPE, content_type(&file))], bytes).into_response())
}

fn content_type(file: &FsPath) -> &'static str {
    match file.extension().and_then(|ext| ext.to_str()) {
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("json" | "map") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

pub async fn health() -> impl IntoResponse {
    "ok"
}

async fn load_study(state: &AppState, curated_study_number: &str) -> Result<StudyDetail, WebError> {
    let curated = curated_study_number.to_string();
    log::debug!("loading study {curated}");
    with_connection(state, move |conn| soc_db::study_detail(conn, &curated)).await
}

/// Open the database and run `query` on the blocking pool.
async fn with_connection<T, F>(state: &AppState, query: F) -> Result<T, WebError>
where
    F: FnOnce(&Connection) -> Result<T, DbError> + Send + 'static,
    T: Send + 'static,
{
    let path = state.database.clone();
    let result = tokio::task::spawn_blocking(move || {
        let conn = soc_db::open_database(&path)?;
        query(&conn)
    })
    .await
    .map_err(|e| WebError::worker(format!("database task failed: {e}")))?;
    Ok(result?)
}
