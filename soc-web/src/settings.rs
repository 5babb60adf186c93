//! Server settings: `~/.config/soc/settings.toml` plus command-line overrides.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//! fallback_port = 5001
//! static_dir = "/srv/soc/static"
//!
//! [database]
//! path = "/srv/soc/soc_data.db"
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
/// Static asset directory, relative to the application root.
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of the settings file. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub fallback_port: Option<u16>,
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: Option<PathBuf>,
}

/// Values given on the command line; they win over the settings file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub fallback_port: Option<u16>,
    pub no_fallback: bool,
    pub database: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
}

/// Fully resolved startup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Port tried once if binding `port` fails.
    pub fallback_port: Option<u16>,
    pub database: PathBuf,
    /// Directory served under `/static/`.
    pub static_dir: PathBuf,
}

/// Canonical path to the settings file: `~/.config/soc/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("soc").join("settings.toml")
}

/// `<application root>/static`.
pub fn default_static_dir() -> PathBuf {
    soc_db::application_root().join(DEFAULT_STATIC_DIR)
}

/// Read settings from `path`. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no settings file at {}", path.display());
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&contents).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl ServerConfig {
    /// Resolve each field: command line, then settings file, then built-in
    /// default. The default fallback port is `port + 1`.
    pub fn resolve(overrides: &Overrides, settings: &Settings) -> Self {
        let host = overrides
            .host
            .clone()
            .or_else(|| settings.server.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = overrides
            .port
            .or(settings.server.port)
            .unwrap_or(DEFAULT_PORT);
        let fallback_port = if overrides.no_fallback {
            None
        } else {
            overrides
                .fallback_port
                .or(settings.server.fallback_port)
                .or_else(|| port.checked_add(1))
        };
        let database = overrides
            .database
            .clone()
            .or_else(|| settings.database.path.clone())
            .unwrap_or_else(soc_db::default_database_path);
        let static_dir = overrides
            .static_dir
            .clone()
            .or_else(|| settings.server.static_dir.clone())
            .unwrap_or_else(default_static_dir);

        Self {
            host,
            port,
            fallback_port,
            database,
            static_dir,
        }
    }
}
