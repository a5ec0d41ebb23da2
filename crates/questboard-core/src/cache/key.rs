//! Cache keys.

use std::fmt;

use crate::types::EntityId;

/// One segment of a [`CacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyPart {
    Str(String),
    Int(i64),
}

impl From<&str> for KeyPart {
    fn from(s: &str) -> Self {
        KeyPart::Str(s.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(s: String) -> Self {
        KeyPart::Str(s)
    }
}

impl From<u32> for KeyPart {
    fn from(n: u32) -> Self {
        KeyPart::Int(i64::from(n))
    }
}

impl From<i64> for KeyPart {
    fn from(n: i64) -> Self {
        KeyPart::Int(n)
    }
}

impl From<EntityId> for KeyPart {
    fn from(id: EntityId) -> Self {
        KeyPart::Str(id.to_string())
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Str(s) => f.write_str(s),
            KeyPart::Int(n) => write!(f, "{n}"),
        }
    }
}

/// An ordered key identifying one cached query.
///
/// Keys are compared part by part; a key matches an invalidation prefix when
/// its leading parts equal the prefix.
///
/// ```
/// use questboard_core::cache::CacheKey;
///
/// let page = CacheKey::new().with("quests").with(0u32).with(20u32);
/// assert!(page.starts_with(&CacheKey::new().with("quests")));
/// assert!(!page.starts_with(&CacheKey::new().with("quest")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(Vec<KeyPart>);

impl CacheKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part.
    pub fn with(mut self, part: impl Into<KeyPart>) -> Self {
        self.0.push(part.into());
        self
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `prefix` is a leading subsequence of this key.
    /// The empty key is a prefix of every key.
    pub fn starts_with(&self, prefix: &CacheKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match part {
                KeyPart::Str(s) => write!(f, "{s:?}")?,
                KeyPart::Int(n) => write!(f, "{n}")?,
            }
        }
        f.write_str("]")
    }
}
