//! Table layout and the version stamp.
//!
//! Table and column names match stores written by earlier releases, so an
//! existing `recipes.db` opens without conversion.

use rusqlite::{params, Connection, OptionalExtension};

/// Version written to `db_version` when a store is created
pub const SCHEMA_VERSION: i64 = 1;

pub const SCHEMA: &str = "
    CREATE TABLE db_version(
        version INTEGER UNIQUE NOT NULL
    );

    CREATE TABLE tags(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE
    );

    CREATE TABLE ingredients(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE
    );

    CREATE TABLE recipes(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE,
        description TEXT
    );

    CREATE TABLE recipe_tag(
        recipe_id INTEGER REFERENCES recipes(id) ON DELETE CASCADE,
        tag_id INTEGER REFERENCES tags(id) ON DELETE CASCADE,
        UNIQUE(recipe_id, tag_id)
    );

    CREATE TABLE recipe_ingredient(
        recipe_id INTEGER REFERENCES recipes(id) ON DELETE CASCADE,
        ingredient_id INTEGER REFERENCES ingredients(id) ON DELETE CASCADE,
        UNIQUE(recipe_id, ingredient_id)
    );
";

/// Per-connection settings; cascades only fire with foreign keys on
pub fn configure(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
}

/// True if the version table exists, i.e. the schema was created before
pub fn is_initialized(conn: &Connection) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'db_version'",
        [],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
}

/// Create every table and write the version row in one transaction
pub fn create(conn: &mut Connection) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA)?;
    tx.execute(
        "INSERT INTO db_version(version) VALUES (?1)",
        params![SCHEMA_VERSION],
    )?;
    tx.commit()
}

/// Read the stored version stamp
pub fn version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT version FROM db_version", [], |row| row.get(0))
}
