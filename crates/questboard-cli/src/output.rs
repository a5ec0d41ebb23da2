//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use questboard_core::Page;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value in the requested JSON style.
pub fn value<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    if pretty { json_pretty(value) } else { json(value) }
}

/// Print a list one item per line, with a note on stderr when it is empty.
pub fn items<T: Serialize>(items: &[T], pretty: bool) -> Result<()> {
    if items.is_empty() {
        eprintln!("{}", "No items found.".dimmed());
        return Ok(());
    }
    for item in items {
        value(item, pretty)?;
    }
    Ok(())
}

/// Print a page of items followed by its position in the collection.
pub fn page<T: Serialize>(page: &Page<T>, pretty: bool) -> Result<()> {
    items(&page.items, pretty)?;
    if !page.items.is_empty() {
        eprintln!();
        eprintln!("{}", page_summary(page).dimmed());
    }
    Ok(())
}

fn page_summary<T>(page: &Page<T>) -> String {
    let first = page.from as usize + 1;
    let last = page.from as usize + page.items.len();
    let mut summary = format!("Showing {first}-{last} of {}", page.total);
    if page.has_more() {
        summary.push_str(&format!(" (next: --from {last})"));
    }
    summary
}
