//! List query parameters.

use serde::Serialize;

use crate::error::{Constraint, ValidationError};
use crate::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::types::EntityId;

use super::rules::Checker;

/// A validated `from`/`count` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageQuery {
    pub from: u32,
    pub count: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            from: 0,
            count: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    /// Validate typed values, defaulting `from` to 0 and `count` to 20.
    pub fn new(from: Option<u32>, count: Option<u32>) -> Result<Self, ValidationError> {
        let count = count.unwrap_or(DEFAULT_PAGE_SIZE);
        if count == 0 || count > MAX_PAGE_SIZE {
            return Err(ValidationError::field(
                "count",
                Constraint::Range {
                    min: 1,
                    max: MAX_PAGE_SIZE as i64,
                },
            ));
        }
        Ok(Self {
            from: from.unwrap_or(0),
            count,
        })
    }

    /// Coerce raw string values (URL query, CLI input) into a window.
    pub fn coerce(from: Option<&str>, count: Option<&str>) -> Result<Self, ValidationError> {
        let mut c = Checker::new();
        let from = from.and_then(|s| coerce_int(&mut c, "from", s, 0, u32::MAX as i64));
        let count = count.and_then(|s| coerce_int(&mut c, "count", s, 1, MAX_PAGE_SIZE as i64));
        c.finish()?;
        Self::new(from, count)
    }

    /// The window starting right after this one.
    pub fn next(self) -> Self {
        Self {
            from: self.from.saturating_add(self.count),
            count: self.count,
        }
    }
}

fn coerce_int(c: &mut Checker, field: &str, raw: &str, min: i64, max: i64) -> Option<u32> {
    match raw.trim().parse::<f64>() {
        Ok(n) => c.int(field, n, min, max).map(|n| n as u32),
        Err(_) => {
            c.fail(field, Constraint::Integer);
            None
        }
    }
}

/// Party list filters on top of the paging window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader_id_filter: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id_filter: Option<EntityId>,
}

impl PartyQuery {
    pub fn new(page: PageQuery, leader: Option<&str>, member: Option<&str>) -> Result<Self, ValidationError> {
        let mut c = Checker::new();
        let leader_id_filter = leader.and_then(|s| c.uuid("leaderIdFilter", s.to_string()));
        let member_id_filter = member.and_then(|s| c.uuid("memberIdFilter", s.to_string()));
        c.finish()?;
        Ok(Self {
            page,
            leader_id_filter,
            member_id_filter,
        })
    }
}
