//! Subcommand implementations.

pub mod announcements;
pub mod comments;
pub mod contractors;
pub mod login;
pub mod logout;
pub mod parties;
pub mod quests;
pub mod system;
pub mod users;
pub mod whoami;

use anyhow::{Context, Result};
use clap::Args;

use questboard_core::EntityId;
use questboard_core::schema::{PageQuery, Patch};

/// Paging and output flags shared by list commands.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Offset of the first item
    #[arg(long)]
    pub from: Option<String>,

    /// Number of items per page (1-1000)
    #[arg(long)]
    pub count: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl ListArgs {
    pub fn page(&self) -> Result<PageQuery> {
        PageQuery::coerce(self.from.as_deref(), self.count.as_deref()).context("Invalid paging options")
    }
}

/// Parse an id argument, naming it in the error.
pub fn parse_id(value: &str, what: &str) -> Result<EntityId> {
    EntityId::parse(value).with_context(|| format!("Invalid {what} id: {value}"))
}

/// An optional flag as a draft field: given means set, missing means untouched.
pub fn opt<T>(value: Option<T>) -> Patch<T> {
    Patch::optional(value)
}

/// A repeatable flag as a draft field. No occurrences leaves it untouched.
pub fn list(values: Vec<String>) -> Patch<Vec<String>> {
    if values.is_empty() { Patch::Absent } else { Patch::Value(values) }
}
