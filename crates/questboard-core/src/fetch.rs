//! Draining a paged collection.

use tracing::{debug, instrument};

use crate::Result;
use crate::page::MAX_PAGE_SIZE;
use crate::traits::PageSource;

/// Fetches every item of a collection page by page.
///
/// Pages are requested one after another; the offset advances by the number
/// of items actually returned, so a server that returns short pages is still
/// drained completely.
#[derive(Debug, Clone, Copy)]
pub struct PagedFetcher {
    page_size: u32,
}

impl Default for PagedFetcher {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
        }
    }
}

impl PagedFetcher {
    /// Create a fetcher. The page size is clamped into `1..=1000`.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch all items from `source`, passing each through `normalize`
    /// together with its absolute index.
    ///
    /// Stops when the offset reaches `total`, when a page comes back empty, or
    /// when the server reports a `count` of zero or less. The first item `normalize`
    /// rejects aborts the fetch.
    #[instrument(skip(self, source, normalize), fields(page_size = self.page_size))]
    pub async fn fetch_all<S, N, F>(&self, source: &S, mut normalize: F) -> Result<Vec<N>>
    where
        S: PageSource + ?Sized,
        F: FnMut(S::Item, usize) -> Result<N>,
    {
        let mut offset: u32 = 0;
        let mut out = Vec::new();

        loop {
            let page = source.fetch_page(offset, self.page_size).await?;
            debug!(from = offset, returned = page.items.len(), total = page.total, "fetched page");

            if page.count <= 0 || page.items.is_empty() {
                break;
            }

            let returned = page.items.len();
            let total = page.total;
            for item in page.items {
                let index = out.len();
                out.push(normalize(item, index)?);
            }

            offset = offset.saturating_add(u32::try_from(returned).unwrap_or(u32::MAX));
            if offset >= total {
                break;
            }
        }

        debug!(items = out.len(), "collection drained");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Constraint, Error, ValidationError};
    use crate::page::Page;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves `0..total` in pages, optionally capping how many items a page holds.
    struct Numbers {
        total: u32,
        cap: Option<u32>,
        reported_count: Option<i64>,
        calls: Mutex<Vec<(u32, u32)>>,
    }

    impl Numbers {
        fn new(total: u32) -> Self {
            Self {
                total,
                cap: None,
                reported_count: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(u32, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for Numbers {
        type Item = u32;

        async fn fetch_page(&self, from: u32, count: u32) -> crate::Result<Page<u32>> {
            self.calls.lock().unwrap().push((from, count));
            let take = self.cap.map_or(count, |cap| cap.min(count));
            let end = (from + take).min(self.total);
            Ok(Page {
                from,
                count: self.reported_count.unwrap_or(count.into()),
                total: self.total,
                items: (from..end).collect(),
            })
        }
    }

    fn identity(n: u32, _: usize) -> crate::Result<u32> {
        Ok(n)
    }

    #[tokio::test]
    async fn requests_ceil_of_total_over_page_size() {
        for (total, size, expected) in [(2500, 1000, 3), (1000, 1000, 1), (7, 3, 3), (1, 1, 1)] {
            let source = Numbers::new(total);
            let items = PagedFetcher::new(size).fetch_all(&source, identity).await.unwrap();
            assert_eq!(items.len() as u32, total);
            assert_eq!(source.calls().len(), expected, "total={total} size={size}");
        }
    }

    #[tokio::test]
    async fn empty_collection_takes_one_request() {
        let source = Numbers::new(0);
        let items = PagedFetcher::new(50).fetch_all(&source, identity).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(source.calls(), vec![(0, 50)]);
    }

    #[tokio::test]
    async fn offset_follows_items_returned() {
        let mut source = Numbers::new(10);
        source.cap = Some(4);
        let items = PagedFetcher::new(1000).fetch_all(&source, identity).await.unwrap();
        assert_eq!(items, (0..10).collect::<Vec<_>>());
        assert_eq!(source.calls(), vec![(0, 1000), (4, 1000), (8, 1000)]);
    }

    #[tokio::test]
    async fn non_positive_count_stops() {
        for reported in [0, -1] {
            let mut source = Numbers::new(100);
            source.reported_count = Some(reported);
            let items = PagedFetcher::new(10).fetch_all(&source, identity).await.unwrap();
            assert!(items.is_empty(), "count={reported}");
            assert_eq!(source.calls().len(), 1);
        }
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(PagedFetcher::new(0).page_size(), 1);
        assert_eq!(PagedFetcher::new(5000).page_size(), 1000);
        assert_eq!(PagedFetcher::default().page_size(), 1000);
    }

    #[tokio::test]
    async fn bad_item_aborts_with_index() {
        let source = Numbers::new(30);
        let err = PagedFetcher::new(10)
            .fetch_all(&source, |n, index| {
                if n == 17 {
                    Err(ValidationError::field(format!("items[{index}].id"), Constraint::Uuid).into())
                } else {
                    Ok(n)
                }
            })
            .await
            .unwrap_err();
        match err {
            Error::Validation(v) => assert!(v.has_field("items[17].id")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(source.calls().len(), 2);
    }
}
