//! Read-only access to the preclinical study database.
//!
//! Opens the SQLite file populated by the data loader, maps rows to
//! column-ordered mappings, and runs the fixed queries behind the study
//! pages.

pub mod connection;
pub mod error;
pub mod queries;
pub mod row;

pub use connection::{
    application_root, default_database_path, open_database, DEFAULT_DATABASE_PATH,
};
pub use error::DbError;
pub use queries::{
    animals_for_study, group_labels_for_study, list_studies, parse_float, study_detail,
    treatments_for_study, tumor_measurements_for_study, StudyDetail, CALIPER_ACTIVITIES,
    TUMOR_VOLUME_UNITS,
};
pub use row::{map_row, query_rows, MappedRows, Row, Value};
pub use rusqlite::Connection;
