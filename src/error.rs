//! # Core Error Types Module
//!
//! This module defines the error taxonomy shared by the catalog, fridge store,
//! recipe matcher and ingestion operations.

/// Errors surfaced by the inventory core
#[derive(Debug, Clone)]
pub enum CoreError {
    /// Unknown item or recipe identifier
    NotFound(String),
    /// A recipe with no required ingredients (data integrity error)
    MalformedRecipe(String),
    /// The backing store is unreachable or a statement failed
    StoreUnavailable(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::NotFound(msg) => write!(f, "Not found: {msg}"),
            CoreError::MalformedRecipe(msg) => write!(f, "Malformed recipe: {msg}"),
            CoreError::StoreUnavailable(msg) => write!(f, "Store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::StoreUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::MalformedRecipe(err.to_string())
    }
}
