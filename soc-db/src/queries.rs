//! Read queries behind the study index and study detail pages.

use std::collections::BTreeMap;

use rusqlite::{params, Connection};
use serde::Serialize;

use crate::error::DbError;
use crate::row::{query_rows, Row, Value};

/// Activity labels that identify caliper tumor measurements.
pub const CALIPER_ACTIVITIES: [&str; 2] = [
    "Caliper - Tumor measurements",
    "Caliper - Tumor measurements (trilogy)",
];

/// Unit of tumor volume measurements.
pub const TUMOR_VOLUME_UNITS: &str = "mm3";

/// Everything the study detail page shows for one study.
#[derive(Debug, Clone, Serialize)]
pub struct StudyDetail {
    pub study: Row,
    pub treatments: Vec<Row>,
    pub measurements: Vec<Row>,
    pub animals: Vec<Row>,
    /// Raw `group_name` → curated display name.
    pub group_labels: BTreeMap<String, String>,
}

// ── Study Index ─────────────────────────────────────────────────────────────

/// All studies, every column, in table order.
pub fn list_studies(conn: &Connection) -> Result<Vec<Row>, DbError> {
    let mut stmt = conn.prepare("SELECT * FROM studies")?;
    let rows = query_rows(&mut stmt, [])?;
    rows.collect()
}

// ── Study Detail ────────────────────────────────────────────────────────────

/// Load a study and its treatments, measurements, animals and group labels.
///
/// When several studies share a curated number, the first one wins.
pub fn study_detail(
    conn: &Connection,
    curated_study_number: &str,
) -> Result<StudyDetail, DbError> {
    let study = find_study(conn, curated_study_number)?;
    let study_number = study
        .get("study_number")
        .cloned()
        .ok_or_else(|| DbError::MissingColumn("study_number".to_string()))?;
    log::debug!("study {curated_study_number} has study_number {study_number}");

    let treatments = treatments_for_study(conn, &study_number)?;
    let measurements = tumor_measurements_for_study(conn, &study_number)?;
    let animals = animals_for_study(conn, &study_number)?;
    let group_labels = group_labels_for_study(conn, &study_number)?;

    Ok(StudyDetail {
        study,
        treatments,
        measurements,
        animals,
        group_labels,
    })
}

fn find_study(conn: &Connection, curated_study_number: &str) -> Result<Row, DbError> {
    let mut stmt = conn.prepare("SELECT * FROM studies WHERE curated_study_number = ?1")?;
    let mut rows = query_rows(&mut stmt, params![curated_study_number])?;
    match rows.next() {
        Some(row) => row,
        None => Err(DbError::StudyNotFound {
            curated_study_number: curated_study_number.to_string(),
        }),
    }
}

/// Treatments ordered by numeric day, with `treatment_day` converted to a float.
pub fn treatments_for_study(conn: &Connection, study_number: &Value) -> Result<Vec<Row>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT * FROM treatments WHERE study_number = ?1
         ORDER BY CAST(treatment_day AS REAL)",
    )?;
    let rows = query_rows(&mut stmt, params![study_number])?;
    rows.map(|row| {
        let mut row = row?;
        coerce_float(&mut row, "treatment_day")?;
        Ok(row)
    })
    .collect()
}

/// Caliper tumor volume measurements ordered by numeric day, with
/// `measurement_day` and `measurement_value` converted to floats.
pub fn tumor_measurements_for_study(
    conn: &Connection,
    study_number: &Value,
) -> Result<Vec<Row>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT * FROM measurements
         WHERE study_number = ?1
           AND activity IN (?2, ?3)
           AND measurement_units = ?4
         ORDER BY CAST(measurement_day AS REAL)",
    )?;
    let rows = query_rows(
        &mut stmt,
        params![
            study_number,
            CALIPER_ACTIVITIES[0],
            CALIPER_ACTIVITIES[1],
            TUMOR_VOLUME_UNITS
        ],
    )?;
    rows.map(|row| {
        let mut row = row?;
        coerce_float(&mut row, "measurement_day")?;
        coerce_float(&mut row, "measurement_value")?;
        Ok(row)
    })
    .collect()
}

/// Animals of a study, unchanged and in table order.
pub fn animals_for_study(conn: &Connection, study_number: &Value) -> Result<Vec<Row>, DbError> {
    let mut stmt = conn.prepare("SELECT * FROM animals WHERE study_number = ?1")?;
    let rows = query_rows(&mut stmt, params![study_number])?;
    rows.collect()
}

/// Curated group names keyed by raw group name. Empty curated names are
/// skipped; a repeated group name keeps the last row's label.
pub fn group_labels_for_study(
    conn: &Connection,
    study_number: &Value,
) -> Result<BTreeMap<String, String>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT group_name, curated_group_name FROM groups
         WHERE study_number = ?1 AND curated_group_name != ''",
    )?;
    let mut labels = BTreeMap::new();
    for row in query_rows(&mut stmt, params![study_number])? {
        let row = row?;
        let name = row
            .get("group_name")
            .ok_or_else(|| DbError::MissingColumn("group_name".to_string()))?;
        let curated = row
            .get("curated_group_name")
            .ok_or_else(|| DbError::MissingColumn("curated_group_name".to_string()))?;
        labels.insert(name.to_label(), curated.to_label());
    }
    Ok(labels)
}

// ── Coercion Helpers ────────────────────────────────────────────────────────

/// Read a stored value as a float the way the data loader wrote it: numbers
/// as-is, text parsed after trimming. Anything else is an error, and so is a
/// non-finite result (`nan`, `inf`), which JSON cannot carry.
pub fn parse_float(column: &str, value: &Value) -> Result<f64, DbError> {
    let parsed = match value {
        Value::Integer(_) | Value::Real(_) => value
            .as_f64()
            .ok_or_else(|| DbError::not_numeric(column, value.to_string())),
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| DbError::not_numeric(column, value.to_string())),
        Value::Null | Value::Blob(_) => Err(DbError::not_numeric(column, value.to_string())),
    }?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(DbError::not_numeric(column, value.to_string()))
    }
}

fn coerce_float(row: &mut Row, column: &str) -> Result<(), DbError> {
    let value = row
        .get(column)
        .ok_or_else(|| DbError::MissingColumn(column.to_string()))?;
    let parsed = parse_float(column, value)?;
    row.set(column, Value::Real(parsed));
    Ok(())
}
