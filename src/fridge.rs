//! # Fridge Store
//!
//! The mutable per-household inventory. Each row is keyed by the item's
//! barcode number, so an item can appear at most once; scanning the same
//! barcode again tops up the existing row instead of inserting a duplicate.
//!
//! Top-ups keep the original `date_added` and `shelf_life_days` — the oldest
//! addition governs expiry. All mutations run read-then-write inside a single
//! transaction.

use chrono::{Duration, Local, NaiveDate};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One inventory row: an item currently in the fridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FridgeEntry {
    /// Barcode number, references the catalog
    pub item_id: i64,
    /// Display name, copied from the catalog at add time
    pub name: String,
    /// Units on hand, always positive at rest
    pub quantity: i64,
    /// Date of the first addition (not refreshed by top-ups)
    pub date_added: NaiveDate,
    /// Shelf life copied from the catalog at add time
    pub shelf_life_days: i64,
}

impl FridgeEntry {
    /// The date on which this entry is considered expired
    pub fn expires_on(&self) -> NaiveDate {
        self.date_added + Duration::days(self.shelf_life_days)
    }

    /// Days until expiry relative to `today`; negative once expired
    pub fn days_to_expiry(&self, today: NaiveDate) -> i64 {
        self.expires_on().signed_duration_since(today).num_days()
    }
}

/// Return the full fridge contents, ordered by item id
pub fn get_all(conn: &Connection) -> Result<Vec<FridgeEntry>, CoreError> {
    let mut stmt = conn.prepare(
        "SELECT item_id, name, quantity, date_added, shelf_life_days
         FROM fridge ORDER BY item_id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(FridgeEntry {
            item_id: row.get(0)?,
            name: row.get(1)?,
            quantity: row.get(2)?,
            date_added: row.get(3)?,
            shelf_life_days: row.get(4)?,
        })
    })?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }

    Ok(entries)
}

/// Add `quantity` units of an item to the fridge
///
/// If the item already has a row, the quantity is added to it and the
/// original `date_added`/`shelf_life_days` are kept. Otherwise a new row is
/// inserted dated today.
pub fn add(
    conn: &Connection,
    item_id: i64,
    name: &str,
    quantity: i64,
    shelf_life_days: i64,
) -> Result<(), CoreError> {
    add_on(conn, item_id, name, quantity, shelf_life_days, Local::now().date_naive())
}

/// Like [`add`], with an explicit date for the new-row case
pub fn add_on(
    conn: &Connection,
    item_id: i64,
    name: &str,
    quantity: i64,
    shelf_life_days: i64,
    today: NaiveDate,
) -> Result<(), CoreError> {
    let tx = conn.unchecked_transaction()?;

    let existing: Option<i64> = tx
        .query_row(
            "SELECT quantity FROM fridge WHERE item_id = ?1",
            params![item_id],
            |row| row.get(0),
        )
        .optional()?;

    match existing {
        Some(current) => {
            info!("Topping up fridge item {item_id}: {current} + {quantity}");
            tx.execute(
                "UPDATE fridge SET quantity = ?1 WHERE item_id = ?2",
                params![current + quantity, item_id],
            )?;
        }
        None => {
            info!("Adding new fridge item {item_id} ({name}), quantity {quantity}");
            tx.execute(
                "INSERT INTO fridge (item_id, name, quantity, date_added, shelf_life_days)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![item_id, name, quantity, today, shelf_life_days],
            )?;
        }
    }

    tx.commit()?;
    Ok(())
}

/// Subtract `amount` units of an item from the fridge
///
/// A missing row is a silent no-op. A non-positive `amount` is the designated
/// delete signal and removes the row unconditionally; callers must not pass
/// `amount <= 0` to mean "consume nothing". If the subtraction brings the
/// quantity to zero or below, the row is deleted rather than left at a
/// non-positive quantity.
pub fn consume(conn: &Connection, item_id: i64, amount: i64) -> Result<(), CoreError> {
    let tx = conn.unchecked_transaction()?;
    consume_within(&tx, item_id, amount)?;
    tx.commit()?;
    Ok(())
}

/// Consumption body without its own transaction, for callers that batch
/// several consumptions atomically (recipe cooking).
pub(crate) fn consume_within(conn: &Connection, item_id: i64, amount: i64) -> Result<(), CoreError> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT quantity FROM fridge WHERE item_id = ?1",
            params![item_id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(current) = existing else {
        info!("Consume of item {item_id} ignored: not in fridge");
        return Ok(());
    };

    // Non-positive amount is the delete signal
    let new_qty = if amount > 0 { current - amount } else { 0 };

    if new_qty <= 0 {
        info!("Removing fridge item {item_id} (was {current})");
        conn.execute("DELETE FROM fridge WHERE item_id = ?1", params![item_id])?;
    } else {
        info!("Consuming {amount} of fridge item {item_id}: {current} -> {new_qty}");
        conn.execute(
            "UPDATE fridge SET quantity = ?1 WHERE item_id = ?2",
            params![new_qty, item_id],
        )?;
    }

    Ok(())
}

/// Remove an item's row entirely (user clearing an entry)
pub fn remove(conn: &Connection, item_id: i64) -> Result<(), CoreError> {
    consume(conn, item_id, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::NamedTempFile;

    fn setup_test_db() -> Result<(Connection, NamedTempFile)> {
        let temp_file = NamedTempFile::new()?;
        let conn = Connection::open(temp_file.path())?;
        crate::db::init_database_schema(&conn)?;
        Ok((conn, temp_file))
    }

    fn entry_count(conn: &Connection) -> Result<i64> {
        Ok(conn.query_row("SELECT count(*) FROM fridge", [], |row| row.get(0))?)
    }

    #[test]
    fn test_add_twice_merges_into_one_entry() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        add(&conn, 42, "Milk", 3, 7)?;
        add(&conn, 42, "Milk", 3, 7)?;

        let entries = get_all(&conn)?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 6);

        Ok(())
    }

    #[test]
    fn test_add_keeps_oldest_date_on_top_up() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();

        add_on(&conn, 42, "Milk", 2, 7, first)?;
        add_on(&conn, 42, "Milk", 2, 14, later)?;

        let entries = get_all(&conn)?;
        assert_eq!(entries[0].quantity, 4);
        // The oldest addition governs expiry
        assert_eq!(entries[0].date_added, first);
        assert_eq!(entries[0].shelf_life_days, 7);

        Ok(())
    }

    #[test]
    fn test_partial_consume_updates_in_place() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        add(&conn, 42, "Milk", 10, 7)?;
        consume(&conn, 42, 4)?;

        let entries = get_all(&conn)?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 6);

        Ok(())
    }

    #[test]
    fn test_consume_to_zero_deletes_entry() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        add(&conn, 42, "Milk", 4, 7)?;
        consume(&conn, 42, 4)?;

        assert_eq!(entry_count(&conn)?, 0);

        Ok(())
    }

    #[test]
    fn test_consume_past_zero_deletes_entry() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        add(&conn, 42, "Milk", 2, 7)?;
        consume(&conn, 42, 100)?;

        assert_eq!(entry_count(&conn)?, 0);

        Ok(())
    }

    #[test]
    fn test_non_positive_amount_deletes_unconditionally() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        add(&conn, 42, "Milk", 50, 7)?;
        consume(&conn, 42, 0)?;
        assert_eq!(entry_count(&conn)?, 0);

        add(&conn, 43, "Eggs", 12, 21)?;
        consume(&conn, 43, -5)?;
        assert_eq!(entry_count(&conn)?, 0);

        Ok(())
    }

    #[test]
    fn test_consume_missing_entry_is_a_no_op() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        consume(&conn, 42, 3)?;
        assert_eq!(entry_count(&conn)?, 0);

        Ok(())
    }

    #[test]
    fn test_remove_clears_entry() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        add(&conn, 42, "Milk", 50, 7)?;
        remove(&conn, 42)?;

        assert_eq!(entry_count(&conn)?, 0);

        Ok(())
    }

    #[test]
    fn test_get_all_ordered_by_item_id() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        add(&conn, 30, "Butter", 1, 30)?;
        add(&conn, 10, "Milk", 1, 7)?;
        add(&conn, 20, "Eggs", 12, 21)?;

        let ids: Vec<i64> = get_all(&conn)?.iter().map(|e| e.item_id).collect();
        assert_eq!(ids, vec![10, 20, 30]);

        Ok(())
    }

    #[test]
    fn test_days_to_expiry_arithmetic() {
        let entry = FridgeEntry {
            item_id: 42,
            name: "Milk".to_string(),
            quantity: 1,
            date_added: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            shelf_life_days: 7,
        };

        let same_day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(entry.days_to_expiry(same_day), 7);

        let on_expiry = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert_eq!(entry.days_to_expiry(on_expiry), 0);

        let past = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(entry.days_to_expiry(past), -2);
    }
}
