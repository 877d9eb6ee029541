use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;

/// Initialize the database schema
///
/// Creates the three relations the core operates on: `catalog` (known items
/// keyed by barcode), `fridge` (current inventory, at most one row per item)
/// and `recipes` (reference recipes with JSON-encoded ingredient lists).
pub fn init_database_schema(conn: &Connection) -> Result<()> {
    info!("Initializing database schema...");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS catalog (
            item_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            default_qty INTEGER NOT NULL,
            shelf_life_days INTEGER NOT NULL
        )",
        [],
    )
    .context("Failed to create catalog table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS fridge (
            item_id INTEGER PRIMARY KEY REFERENCES catalog(item_id),
            name TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            date_added TEXT NOT NULL,
            shelf_life_days INTEGER NOT NULL
        )",
        [],
    )
    .context("Failed to create fridge table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS recipes (
            recipe_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            ingredients TEXT NOT NULL,
            instructions TEXT NOT NULL,
            image TEXT
        )",
        [],
    )
    .context("Failed to create recipes table")?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Open a connection to the database at `path` and ensure the schema exists
pub fn open_database(path: &str) -> Result<Connection> {
    info!("Opening database at: {}", path);

    let conn = Connection::open(path).context("Failed to open database")?;
    init_database_schema(&conn)?;

    Ok(conn)
}
