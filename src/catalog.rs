//! # Catalog Reference Data
//!
//! Read-mostly reference data for the inventory core: known items (keyed by
//! their barcode number) and recipes. Both are immutable from the point of
//! view of the scanning and cooking flows; the `put_*` helpers exist for
//! provisioning and tests.
//!
//! Recipe ingredient and instruction lists are stored as JSON text columns
//! and decoded with serde on read. A recipe whose ingredient list decodes to
//! empty is rejected as [`CoreError::MalformedRecipe`] by the matcher rather
//! than dividing by zero.

use log::info;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A known grocery item, keyed by its barcode/UPC number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Barcode number, unique and stable
    pub item_id: i64,
    /// Display name (e.g., "Milk", "Eggs")
    pub name: String,
    /// Quantity added to the fridge per scan
    pub default_qty: i64,
    /// Days after adding before the item is considered expired
    pub shelf_life_days: i64,
}

/// A reference recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub recipe_id: i64,
    pub name: String,
    /// Ordered (item id, required quantity) pairs
    pub ingredients: Vec<(i64, i64)>,
    /// Ordered preparation steps
    pub instructions: Vec<String>,
    /// Optional image path for display
    pub image: Option<String>,
}

/// Insert or replace a catalog item
pub fn put_item(conn: &Connection, item: &Item) -> Result<(), CoreError> {
    info!("Provisioning catalog item {}: {}", item.item_id, item.name);

    conn.execute(
        "INSERT OR REPLACE INTO catalog (item_id, name, default_qty, shelf_life_days)
         VALUES (?1, ?2, ?3, ?4)",
        params![item.item_id, item.name, item.default_qty, item.shelf_life_days],
    )?;

    Ok(())
}

/// Look up a catalog item by barcode number
pub fn get_item(conn: &Connection, item_id: i64) -> Result<Item, CoreError> {
    let result = conn.query_row(
        "SELECT item_id, name, default_qty, shelf_life_days FROM catalog WHERE item_id = ?1",
        params![item_id],
        |row| {
            Ok(Item {
                item_id: row.get(0)?,
                name: row.get(1)?,
                default_qty: row.get(2)?,
                shelf_life_days: row.get(3)?,
            })
        },
    );

    match result {
        Ok(item) => Ok(item),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(CoreError::NotFound(format!(
            "item {item_id} is not in the catalog"
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Look up a catalog item id by display name (case-insensitive)
pub fn find_item_by_name(conn: &Connection, name: &str) -> Result<i64, CoreError> {
    let result = conn.query_row(
        "SELECT item_id FROM catalog WHERE lower(name) = lower(?1)",
        params![name],
        |row| row.get(0),
    );

    match result {
        Ok(id) => Ok(id),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(CoreError::NotFound(format!(
            "no catalog item named '{name}'"
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Insert or replace a recipe
pub fn put_recipe(conn: &Connection, recipe: &Recipe) -> Result<(), CoreError> {
    info!(
        "Provisioning recipe {}: {} ({} ingredients)",
        recipe.recipe_id,
        recipe.name,
        recipe.ingredients.len()
    );

    let ingredients = serde_json::to_string(&recipe.ingredients)?;
    let instructions = serde_json::to_string(&recipe.instructions)?;

    conn.execute(
        "INSERT OR REPLACE INTO recipes (recipe_id, name, ingredients, instructions, image)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![recipe.recipe_id, recipe.name, ingredients, instructions, recipe.image],
    )?;

    Ok(())
}

fn recipe_from_row(row: &rusqlite::Row) -> rusqlite::Result<(i64, String, String, String, Option<String>)> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn decode_recipe(
    (recipe_id, name, ingredients, instructions, image): (i64, String, String, String, Option<String>),
) -> Result<Recipe, CoreError> {
    Ok(Recipe {
        recipe_id,
        name,
        ingredients: serde_json::from_str(&ingredients)?,
        instructions: serde_json::from_str(&instructions)?,
        image,
    })
}

/// Look up a recipe by id
pub fn get_recipe(conn: &Connection, recipe_id: i64) -> Result<Recipe, CoreError> {
    let result = conn.query_row(
        "SELECT recipe_id, name, ingredients, instructions, image
         FROM recipes WHERE recipe_id = ?1",
        params![recipe_id],
        recipe_from_row,
    );

    match result {
        Ok(raw) => decode_recipe(raw),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            Err(CoreError::NotFound(format!("recipe {recipe_id} does not exist")))
        }
        Err(e) => Err(e.into()),
    }
}

/// Return every recipe in the catalog, ordered by id
pub fn all_recipes(conn: &Connection) -> Result<Vec<Recipe>, CoreError> {
    let mut stmt = conn.prepare(
        "SELECT recipe_id, name, ingredients, instructions, image
         FROM recipes ORDER BY recipe_id",
    )?;

    let rows = stmt.query_map([], recipe_from_row)?;

    let mut recipes = Vec::new();
    for row in rows {
        recipes.push(decode_recipe(row?)?);
    }

    Ok(recipes)
}
