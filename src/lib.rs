//! # Fridgekeeper
//!
//! Tracks a household's perishable inventory ("the fridge"), fed by barcode
//! scans, and derives two things from it: a ranked list of recipes the
//! current inventory can support, and actionable notifications for items
//! that are running low, expiring soon or already expired.
//!
//! The crate is the algorithmic core only. Screens, cameras, barcode image
//! decoding and audio live elsewhere and talk to this crate through the
//! functions re-exported below:
//!
//! - [`ingestion::record_scan`] / [`ingestion::confirm_add`] — scanning flow
//! - [`fridge::get_all`] / [`fridge::remove`] — inventory snapshot and edits
//! - [`matcher::top_recipes`] — recipe suggestions
//! - [`notifications::derive`] — low-stock/expiry notifications
//! - [`ingestion::cook_recipe`] — consume a recipe's ingredients atomically

pub mod catalog;
pub mod db;
pub mod error;
pub mod fridge;
pub mod ingestion;
pub mod matcher;
pub mod notifications;

pub use catalog::{Item, Recipe};
pub use error::CoreError;
pub use fridge::FridgeEntry;
pub use matcher::{RecipeMatch, TOP_K};
pub use notifications::{Notification, NotificationKind, NotifyConfig};
