//! Paged collections returned by list endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;
use crate::error::Error;

/// Largest page size the backend accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// One page of a server-side collection.
///
/// `items.len() <= count` and `from + items.len() <= total` are enforced by the
/// server and not verified here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Offset of the first item.
    pub from: u32,
    /// Page size the server applied. Signed so that a nonsensical negative
    /// value still decodes and the fetcher can stop on it.
    pub count: i64,
    /// Total number of items in the collection.
    pub total: u32,
    /// Items on this page, in server order.
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Transform every item, failing on the first error.
    pub fn try_map<U, F>(self, f: F) -> Result<Page<U>>
    where
        F: FnMut(T) -> Result<U>,
    {
        Ok(Page {
            from: self.from,
            count: self.count,
            total: self.total,
            items: self.items.into_iter().map(f).collect::<Result<_>>()?,
        })
    }

    /// Returns true if more items exist past this page.
    pub fn has_more(&self) -> bool {
        (self.from as u64 + self.items.len() as u64) < self.total as u64
    }
}

/// Wire format of a list payload.
///
/// The format is fixed per endpoint; bodies are never inspected to guess it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFormat {
    /// `{from, count, total, items}`.
    #[default]
    Current,
    /// `{users, totalCount}` served by older user endpoints.
    LegacyUsers,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct LegacyUserList<T> {
    users: Vec<T>,
    total_count: u32,
}

impl ListFormat {
    /// Decode a list payload (the envelope's `data`) in this format.
    ///
    /// Legacy payloads carry no paging echo, so the requested `from`/`count`
    /// fill those fields.
    pub fn decode<T: DeserializeOwned>(self, data: Value, from: u32, count: u32) -> Result<Page<T>> {
        match self {
            ListFormat::Current => serde_json::from_value(data)
                .map_err(|e| Error::malformed(format!("expected paged list: {e}"))),
            ListFormat::LegacyUsers => {
                let legacy: LegacyUserList<T> = serde_json::from_value(data)
                    .map_err(|e| Error::malformed(format!("expected legacy user list: {e}")))?;
                Ok(Page {
                    from,
                    count: count.into(),
                    total: legacy.total_count,
                    items: legacy.users,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn current_format_decodes() {
        let page: Page<u32> = ListFormat::Current
            .decode(json!({"from": 0, "count": 2, "total": 3, "items": [1, 2]}), 0, 2)
            .unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert!(page.has_more());
    }

    #[test]
    fn legacy_format_uses_requested_window() {
        let page: Page<u32> = ListFormat::LegacyUsers
            .decode(json!({"users": [5], "totalCount": 6}), 5, 1)
            .unwrap();
        assert_eq!(page.from, 5);
        assert_eq!(page.total, 6);
        assert!(!page.has_more());
    }

    #[test]
    fn negative_count_decodes() {
        let page: Page<u32> = ListFormat::Current
            .decode(json!({"from": 3, "count": -1, "total": 10, "items": []}), 3, 3)
            .unwrap();
        assert_eq!(page.count, -1);
    }

    #[test]
    fn wrong_format_is_malformed() {
        let err = ListFormat::Current
            .decode::<u32>(json!({"users": [], "totalCount": 0}), 0, 20)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));

        let err = ListFormat::LegacyUsers
            .decode::<u32>(json!({"from": 0, "count": 20, "total": 0, "items": []}), 0, 20)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}
