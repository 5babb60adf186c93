//! Locating and opening the study database.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use crate::error::DbError;

/// Location of the database file, relative to the application root.
pub const DEFAULT_DATABASE_PATH: &str = "soc_data/soc_data.db";

/// Directory holding the running executable, or `.` when it can't be determined.
pub fn application_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.canonicalize().ok())
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `<application root>/soc_data/soc_data.db`.
pub fn default_database_path() -> PathBuf {
    application_root().join(DEFAULT_DATABASE_PATH)
}

/// Open the database at `path` read-only.
///
/// The file must already exist; SQLite is never allowed to create it. The
/// returned error carries the absolute path that was tried. The connection
/// closes when dropped.
pub fn open_database(path: &Path) -> Result<Connection, DbError> {
    let resolved = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    if !resolved.is_file() {
        return Err(DbError::DatabaseNotFound { path: resolved });
    }

    log::debug!("opening {}", resolved.display());
    let conn = Connection::open_with_flags(
        &resolved,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    Ok(conn)
}
