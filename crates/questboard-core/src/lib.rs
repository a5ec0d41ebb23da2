//! questboard-core - Core Quest Board types, validation, paging and caching.
//!
//! This crate holds everything the Quest Board API layer needs that does not
//! touch the network: the response envelope codec, the error taxonomy,
//! validated identifiers, input schemas with create and partial semantics,
//! resource models, the paged collection fetcher and the keyed query cache.
//!
//! # Example
//!
//! ```
//! use questboard_core::schema::QuestDraft;
//!
//! let draft: QuestDraft = serde_json::from_value(serde_json::json!({
//!     "questOwnerId": "3b241101-e2bb-4255-8caf-4136c566a962",
//!     "title": "Slay the dragon",
//!     "rank": 5,
//!     "limitDate": "2025-01-01T00:00:00Z"
//! }))
//! .unwrap();
//!
//! let quest = draft.validate_create().unwrap();
//! assert_eq!(quest.reword_point, 0.0);
//! ```

pub mod cache;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod models;
pub mod page;
pub mod schema;
pub mod traits;
pub mod types;

// Re-export primary types at crate root for convenience
pub use cache::{CacheConfig, CacheKey, QueryCache, Subscription};
pub use envelope::Envelope;
pub use error::{Error, MalformedResponseError, NetworkError, RemoteError, ValidationError};
pub use fetch::PagedFetcher;
pub use page::{ListFormat, Page};
pub use traits::PageSource;
pub use types::{BaseUrl, EntityId, Timestamp};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
