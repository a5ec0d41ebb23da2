//! Page source trait.

use async_trait::async_trait;

use crate::Result;
use crate::page::Page;

/// Something that can serve one window of a server-side collection.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Raw item type, before normalization.
    type Item: Send;

    /// Fetch the items in `from..from + count`.
    async fn fetch_page(&self, from: u32, count: u32) -> Result<Page<Self::Item>>;
}
