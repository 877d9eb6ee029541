//! # Ingestion
//!
//! Entry points for getting inventory into and out of the fridge: resolving a
//! scanned barcode against the catalog, confirming an add with the item's
//! catalog defaults, and consuming a recipe's worth of ingredients when it is
//! cooked.

use log::info;
use rusqlite::Connection;

use crate::catalog::{self, Item};
use crate::error::CoreError;
use crate::fridge;

/// Resolve a scanned barcode number to its catalog item
///
/// Fails with [`CoreError::NotFound`] for an unknown barcode, so callers can
/// distinguish "unknown product" from a valid scan.
pub fn record_scan(conn: &Connection, item_id: i64) -> Result<Item, CoreError> {
    info!("Resolving scanned barcode {item_id}");
    catalog::get_item(conn, item_id)
}

/// Add a scanned item to the fridge using its catalog defaults
///
/// Called after the user confirms a scan. Quantity and shelf life come from
/// the catalog entry; repeated confirmations top up the same fridge row.
pub fn confirm_add(conn: &Connection, item_id: i64) -> Result<(), CoreError> {
    let item = catalog::get_item(conn, item_id)?;

    info!(
        "Confirmed add of item {} ({}): qty {}, shelf life {} days",
        item.item_id, item.name, item.default_qty, item.shelf_life_days
    );

    fridge::add(conn, item.item_id, &item.name, item.default_qty, item.shelf_life_days)
}

/// Consume every ingredient of a recipe from the fridge
///
/// All consumptions commit in a single transaction: a failure partway rolls
/// the whole cook back. Ingredients missing from the fridge follow the
/// store's consume semantics and are skipped silently.
pub fn cook_recipe(conn: &Connection, recipe_id: i64) -> Result<(), CoreError> {
    let recipe = catalog::get_recipe(conn, recipe_id)?;

    info!(
        "Cooking recipe {} ({}): consuming {} ingredients",
        recipe.recipe_id,
        recipe.name,
        recipe.ingredients.len()
    );

    let tx = conn.unchecked_transaction()?;
    for &(item_id, required_qty) in &recipe.ingredients {
        fridge::consume_within(&tx, item_id, required_qty)?;
    }
    tx.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Recipe;
    use anyhow::Result;
    use tempfile::NamedTempFile;

    fn setup_test_db() -> Result<(Connection, NamedTempFile)> {
        let temp_file = NamedTempFile::new()?;
        let conn = Connection::open(temp_file.path())?;
        crate::db::init_database_schema(&conn)?;
        Ok((conn, temp_file))
    }

    fn provision_milk(conn: &Connection) -> Result<()> {
        catalog::put_item(
            conn,
            &Item {
                item_id: 42,
                name: "Milk".to_string(),
                default_qty: 1,
                shelf_life_days: 7,
            },
        )?;
        Ok(())
    }

    #[test]
    fn test_record_scan_known_barcode() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;
        provision_milk(&conn)?;

        let item = record_scan(&conn, 42)?;
        assert_eq!(item.name, "Milk");

        Ok(())
    }

    #[test]
    fn test_record_scan_unknown_barcode() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        let err = record_scan(&conn, 123456).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));

        Ok(())
    }

    #[test]
    fn test_confirm_add_uses_catalog_defaults() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;
        provision_milk(&conn)?;

        confirm_add(&conn, 42)?;

        let entries = fridge::get_all(&conn)?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 1);
        assert_eq!(entries[0].shelf_life_days, 7);
        assert_eq!(entries[0].name, "Milk");

        Ok(())
    }

    #[test]
    fn test_confirm_add_unknown_item_is_not_found() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        let err = confirm_add(&conn, 42).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
        assert!(fridge::get_all(&conn)?.is_empty());

        Ok(())
    }

    #[test]
    fn test_cook_recipe_consumes_each_ingredient() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        catalog::put_recipe(
            &conn,
            &Recipe {
                recipe_id: 1,
                name: "Pancakes".to_string(),
                ingredients: vec![(42, 1), (7, 2)],
                instructions: vec![],
                image: None,
            },
        )?;
        fridge::add(&conn, 42, "Milk", 3, 7)?;
        fridge::add(&conn, 7, "Flour", 2, 90)?;

        cook_recipe(&conn, 1)?;

        let entries = fridge::get_all(&conn)?;
        // Flour hit zero and was deleted; milk was decremented in place
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].item_id, 42);
        assert_eq!(entries[0].quantity, 2);

        Ok(())
    }

    #[test]
    fn test_cook_recipe_skips_missing_ingredients() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        catalog::put_recipe(
            &conn,
            &Recipe {
                recipe_id: 1,
                name: "Pancakes".to_string(),
                ingredients: vec![(42, 1), (7, 2)],
                instructions: vec![],
                image: None,
            },
        )?;
        fridge::add(&conn, 42, "Milk", 3, 7)?;

        // Item 7 is not in the fridge; the cook still succeeds
        cook_recipe(&conn, 1)?;

        let entries = fridge::get_all(&conn)?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 2);

        Ok(())
    }

    #[test]
    fn test_cook_unknown_recipe_is_not_found() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        fridge::add(&conn, 42, "Milk", 3, 7)?;
        let err = cook_recipe(&conn, 99).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));

        // Nothing was consumed
        assert_eq!(fridge::get_all(&conn)?[0].quantity, 3);

        Ok(())
    }
}
