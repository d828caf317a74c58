//! Subcommand implementations.

pub mod admin;
pub mod listings;
pub mod location;
pub mod session;

use anyhow::Result;
use serde::Serialize;

/// Pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_page_footer<T>(page: &houselink_core::models::Page<T>) {
    println!(
        "-- page {} of {} ({} total)",
        page.page,
        page.total_pages().max(1),
        page.total
    );
}
