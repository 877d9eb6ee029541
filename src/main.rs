use anyhow::Result;
use chrono::Local;
use log::info;
use std::env;

use fridgekeeper::{db, fridge, matcher, notifications};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    info!("Starting fridgekeeper");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Get database path from environment
    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "fridge.db".to_string());

    let conn = db::open_database(&database_url)?;
    let today = Local::now().date_naive();

    let entries = fridge::get_all(&conn)?;
    println!("Fridge ({} items):", entries.len());
    for entry in &entries {
        println!(
            "  {} x{} (expires in {} days)",
            entry.name,
            entry.quantity,
            entry.days_to_expiry(today)
        );
    }

    println!("\nSuggested recipes:");
    for suggestion in matcher::top_recipes(&conn)? {
        if suggestion.is_placeholder() {
            continue;
        }
        println!(
            "  {} ({:.0}% match)",
            suggestion.name,
            suggestion.match_fraction * 100.0
        );
    }

    println!("\nNotifications:");
    for n in notifications::derive(&entries, today, &notifications::NotifyConfig::default()) {
        println!("  {} [{}]: {}", n.name, n.kind, n.detail);
    }

    Ok(())
}
