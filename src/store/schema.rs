//! SQLite schema for the key-value table.
//!
//! Migrations are applied in order; `schema_version` records which ones
//! have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: flat key-value table
    r#"
CREATE TABLE kv (
    key     TEXT PRIMARY KEY NOT NULL,
    value   TEXT NOT NULL
) WITHOUT ROWID;
"#,
];
