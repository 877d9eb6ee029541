//! # Recipe Matcher
//!
//! Ranks every known recipe against the current fridge contents and keeps the
//! five best. A recipe's score is the fraction of its required ingredients
//! that are in the fridge in sufficient quantity.
//!
//! ## Ranking rules
//!
//! - Presence alone is not enough: an ingredient that is in the fridge but
//!   below the required quantity does not count as matched.
//! - A candidate only enters the top five by strictly beating the current
//!   minimum score; on a tie at the minimum, the earliest-inserted entry
//!   survives. This is defined behavior, not an ordering accident.
//! - The result always has exactly [`TOP_K`] slots; with fewer recipes in the
//!   catalog the tail is padded with placeholder entries.

use std::collections::HashMap;

use log::warn;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, Recipe};
use crate::error::CoreError;
use crate::fridge;

/// Number of recipe suggestions returned per call
pub const TOP_K: usize = 5;

/// A scored recipe suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeMatch {
    /// `None` for a padding slot when the catalog has fewer than [`TOP_K`] recipes
    pub recipe_id: Option<i64>,
    pub name: String,
    /// Fraction of required ingredients on hand in sufficient quantity, in [0, 1]
    pub match_fraction: f64,
}

impl RecipeMatch {
    fn placeholder() -> Self {
        RecipeMatch {
            recipe_id: None,
            name: String::new(),
            match_fraction: 0.0,
        }
    }

    /// True for an unfilled padding slot
    pub fn is_placeholder(&self) -> bool {
        self.recipe_id.is_none()
    }
}

/// Score one recipe against the indexed fridge stock
///
/// `stock` maps item id to quantity on hand. Fails with
/// [`CoreError::MalformedRecipe`] for a recipe with no required ingredients.
pub fn match_fraction(recipe: &Recipe, stock: &HashMap<i64, i64>) -> Result<f64, CoreError> {
    if recipe.ingredients.is_empty() {
        return Err(CoreError::MalformedRecipe(format!(
            "recipe {} ('{}') has no required ingredients",
            recipe.recipe_id, recipe.name
        )));
    }

    let mut matched = 0usize;
    for &(item_id, required) in &recipe.ingredients {
        if let Some(&on_hand) = stock.get(&item_id) {
            if on_hand >= required {
                matched += 1;
            }
        }
    }

    Ok(matched as f64 / recipe.ingredients.len() as f64)
}

/// Rank all recipes against the current fridge contents
///
/// Returns exactly [`TOP_K`] entries sorted descending by match fraction;
/// ties keep the order in which entries won their slot. Malformed recipes
/// are logged and excluded rather than failing the whole ranking.
pub fn top_recipes(conn: &Connection) -> Result<Vec<RecipeMatch>, CoreError> {
    // One consistent snapshot of fridge quantities, indexed by item id, so
    // scoring never interleaves per-ingredient queries with concurrent writes.
    let stock: HashMap<i64, i64> = fridge::get_all(conn)?
        .into_iter()
        .map(|entry| (entry.item_id, entry.quantity))
        .collect();

    let recipes = catalog::all_recipes(conn)?;

    let mut slots: Vec<RecipeMatch> = (0..TOP_K).map(|_| RecipeMatch::placeholder()).collect();

    for recipe in &recipes {
        let fraction = match match_fraction(recipe, &stock) {
            Ok(fraction) => fraction,
            Err(e) => {
                warn!("Excluding recipe {} from ranking: {}", recipe.recipe_id, e);
                continue;
            }
        };

        // Strict `<` keeps the first slot holding the minimum
        let mut min_idx = 0;
        for i in 1..slots.len() {
            if slots[i].match_fraction < slots[min_idx].match_fraction {
                min_idx = i;
            }
        }

        // Only a strict improvement over the current minimum earns a slot
        if fraction > slots[min_idx].match_fraction {
            slots.remove(min_idx);
            slots.push(RecipeMatch {
                recipe_id: Some(recipe.recipe_id),
                name: recipe.name.clone(),
                match_fraction: fraction,
            });
        }
    }

    // Stable sort: ties keep slot-insertion order
    slots.sort_by(|a, b| b.match_fraction.total_cmp(&a.match_fraction));

    Ok(slots)
}
