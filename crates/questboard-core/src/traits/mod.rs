//! Core traits for data sources.

mod page_source;

pub use page_source::PageSource;
