//! Server instance: shared state, router, and the listener bind policy.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::render::{EmbeddedJsonRenderer, Renderer};
use crate::routes;
use crate::settings::default_static_dir;

/// State shared by every request. Built once at startup; requests only read it.
#[derive(Clone)]
pub struct AppState {
    pub database: Arc<PathBuf>,
    /// Root of the files served under `/static/`.
    pub static_dir: Arc<PathBuf>,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    pub fn new(database: PathBuf) -> Self {
        Self {
            database: Arc::new(database),
            static_dir: Arc::new(default_static_dir()),
            renderer: Arc::new(EmbeddedJsonRenderer),
        }
    }

    pub fn with_static_dir(mut self, static_dir: PathBuf) -> Self {
        self.static_dir = Arc::new(static_dir);
        self
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/index.html", get(routes::index_html))
        .route("/study/{page}", get(routes::study_html))
        .route("/api/studies", get(routes::api_studies))
        .route("/api/study/{curated_study_number}", get(routes::api_study))
        .route("/static/{*path}", get(routes::static_asset))
        .route("/health", get(routes::health))
        .with_state(state)
}

/// Bind `host:port`. If that fails and a fallback port is configured, try
/// `host:fallback_port` once. Without a fallback the first error is returned.
pub async fn bind_with_fallback(
    host: &str,
    port: u16,
    fallback_port: Option<u16>,
) -> io::Result<TcpListener> {
    match TcpListener::bind((host, port)).await {
        Ok(listener) => Ok(listener),
        Err(err) => {
            let Some(fallback) = fallback_port else {
                return Err(err);
            };
            log::warn!("could not bind {host}:{port} ({err}), trying port {fallback}");
            TcpListener::bind((host, fallback)).await
        }
    }
}

/// Serve requests on `listener` until the process exits.
pub async fn serve(listener: TcpListener, state: AppState) -> io::Result<()> {
    axum::serve(listener, build_router(state)).await
}
