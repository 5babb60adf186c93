//! HTTP front-end for browsing preclinical studies.
//!
//! Serves a study index and per-study detail pages (plus their JSON
//! equivalents) from the read-only study database.

pub mod error;
pub mod render;
pub mod routes;
pub mod server;
pub mod settings;

pub use error::WebError;
pub use render::{EmbeddedJsonRenderer, Renderer};
pub use server::{bind_with_fallback, build_router, serve, AppState};
pub use settings::{
    default_static_dir, load_settings, settings_path, Overrides, ServerConfig, Settings,
};
