//! # Notification Deriver
//!
//! Turns a fridge snapshot into actionable notifications: items running low,
//! items about to expire and items already expired. Derivation is a pure
//! function over the snapshot; nothing is persisted and each call recomputes
//! from scratch.
//!
//! Each entry is evaluated independently and can emit zero, one or two
//! notifications: low stock is orthogonal to the expiry check, while
//! expiring-soon and expired are mutually exclusive (they split on the sign
//! of the days-to-expiry value).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fridge::FridgeEntry;

/// Thresholds for notification derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Quantity at or below which an item counts as running low
    pub low_stock_threshold: i64,
    /// Days-to-expiry at or below which the expiry check fires
    pub expiry_window_days: i64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        NotifyConfig {
            low_stock_threshold: 5,
            expiry_window_days: 5,
        }
    }
}

/// What a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    LowStock,
    ExpiringSoon,
    Expired,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::LowStock => write!(f, "low stock"),
            NotificationKind::ExpiringSoon => write!(f, "expiring soon"),
            NotificationKind::Expired => write!(f, "expired"),
        }
    }
}

/// One actionable notification about a fridge item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub item_id: i64,
    pub name: String,
    pub kind: NotificationKind,
    /// Human-readable detail (e.g., "expiring in 3 days")
    pub detail: String,
}

/// Derive notifications from a fridge snapshot
///
/// Output order follows the snapshot's iteration order; callers wanting
/// severity ordering sort on their side.
pub fn derive(entries: &[FridgeEntry], today: NaiveDate, config: &NotifyConfig) -> Vec<Notification> {
    let mut notifications = Vec::new();

    for entry in entries {
        if entry.quantity <= config.low_stock_threshold {
            notifications.push(Notification {
                item_id: entry.item_id,
                name: entry.name.clone(),
                kind: NotificationKind::LowStock,
                detail: format!("only {} left", entry.quantity),
            });
        }

        let days = entry.days_to_expiry(today);
        if days <= config.expiry_window_days {
            if days < 0 {
                notifications.push(Notification {
                    item_id: entry.item_id,
                    name: entry.name.clone(),
                    kind: NotificationKind::Expired,
                    detail: format!("expired {} days ago", -days),
                });
            } else {
                notifications.push(Notification {
                    item_id: entry.item_id,
                    name: entry.name.clone(),
                    kind: NotificationKind::ExpiringSoon,
                    detail: format!("expiring in {} days", days),
                });
            }
        }
    }

    notifications
}
