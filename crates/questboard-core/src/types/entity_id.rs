//! Entity identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Constraint, Error, ValidationError};

/// A validated entity identifier.
///
/// Every quest, party, user, comment and contractor is addressed by a UUID.
///
/// # Example
///
/// ```
/// use questboard_core::EntityId;
///
/// let id = EntityId::parse("6f1c1f9e-4c43-4b35-9d3e-4f8e7f2c6a10").unwrap();
/// assert_eq!(id.to_string(), "6f1c1f9e-4c43-4b35-9d3e-4f8e7f2c6a10");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Parse an identifier, reporting failures against the field `id`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        Self::parse_field(s, "id")
    }

    /// Parse an identifier, reporting failures against the given field.
    ///
    /// Only the hyphenated 36-character form is accepted (either case).
    /// Braced, `urn:uuid:` and simple forms are rejected, as is surrounding
    /// whitespace.
    pub fn parse_field(s: &str, field: &str) -> Result<Self, Error> {
        if !is_hyphenated(s) {
            return Err(ValidationError::field(field, Constraint::Uuid).into());
        }
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ValidationError::field(field, Constraint::Uuid).into())
    }

    /// Generate a random identifier.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

fn is_hyphenated(s: &str) -> bool {
    s.len() == 36
        && s.bytes().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => b == b'-',
            _ => b.is_ascii_hexdigit(),
        })
}

impl From<Uuid> for EntityId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for EntityId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
