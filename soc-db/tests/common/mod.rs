#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

pub const TUMOR: &str = "Caliper - Tumor measurements";
pub const TUMOR_TRILOGY: &str = "Caliper - Tumor measurements (trilogy)";

/// Tables shaped like the ones the data loader produces. Day and value
/// columns are TEXT, as in the real file.
pub const FIXTURE_SCHEMA: &str = "
    CREATE TABLE studies (
        curated_study_number TEXT,
        study_number TEXT,
        title TEXT,
        tumor_type TEXT
    );
    CREATE TABLE treatments (
        study_number TEXT,
        group_name TEXT,
        treatment_day TEXT,
        agent TEXT
    );
    CREATE TABLE measurements (
        study_number TEXT,
        animal_id TEXT,
        activity TEXT,
        measurement_day TEXT,
        measurement_value TEXT,
        measurement_units TEXT
    );
    CREATE TABLE animals (
        study_number TEXT,
        animal_id TEXT,
        group_name TEXT
    );
    CREATE TABLE groups (
        study_number TEXT,
        group_name TEXT,
        curated_group_name TEXT
    );
";

pub fn memory_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(FIXTURE_SCHEMA).unwrap();
    conn
}

/// Create a populated database file at `dir/soc_data.db`.
pub fn file_db(dir: &Path) -> PathBuf {
    let path = dir.join("soc_data.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(FIXTURE_SCHEMA).unwrap();
    insert_study(&conn, "TM00001", "S-1", "Colon xenograft");
    insert_study(&conn, "TM00002", "S-2", "Lung xenograft");
    path
}

pub fn insert_study(conn: &Connection, curated: &str, number: &str, title: &str) {
    conn.execute(
        "INSERT INTO studies (curated_study_number, study_number, title, tumor_type)
         VALUES (?1, ?2, ?3, 'solid')",
        params![curated, number, title],
    )
    .unwrap();
}

pub fn insert_treatment(conn: &Connection, study: &str, group: &str, day: &str, agent: &str) {
    conn.execute(
        "INSERT INTO treatments (study_number, group_name, treatment_day, agent)
         VALUES (?1, ?2, ?3, ?4)",
        params![study, group, day, agent],
    )
    .unwrap();
}

pub fn insert_measurement(
    conn: &Connection,
    study: &str,
    animal: &str,
    activity: &str,
    day: &str,
    value: &str,
    units: &str,
) {
    conn.execute(
        "INSERT INTO measurements
            (study_number, animal_id, activity, measurement_day, measurement_value, measurement_units)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![study, animal, activity, day, value, units],
    )
    .unwrap();
}

pub fn insert_animal(conn: &Connection, study: &str, animal: &str, group: &str) {
    conn.execute(
        "INSERT INTO animals (study_number, animal_id, group_name) VALUES (?1, ?2, ?3)",
        params![study, animal, group],
    )
    .unwrap();
}

pub fn insert_group(conn: &Connection, study: &str, group: &str, curated: Option<&str>) {
    conn.execute(
        "INSERT INTO groups (study_number, group_name, curated_group_name) VALUES (?1, ?2, ?3)",
        params![study, group, curated],
    )
    .unwrap();
}
