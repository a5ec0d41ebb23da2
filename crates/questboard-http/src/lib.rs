//! questboard-http - reqwest client for the Quest Board REST API.
//!
//! [`ApiClient`] speaks the `{success, code, message, data}` envelope and
//! carries session cookies like a browser would. [`QuestBoard`] puts a
//! [`QueryCache`](questboard_core::QueryCache) in front of it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use questboard_core::schema::PageQuery;
//! use questboard_core::{BaseUrl, QueryCache};
//! use questboard_http::{ApiClient, ClientConfig, QuestBoard};
//!
//! # async fn example() -> Result<(), questboard_core::Error> {
//! let base = BaseUrl::new("https://guild.example.com/quest-board")?;
//! let client = ApiClient::new(ClientConfig::new(base))?;
//! client.sign_in("aria", "hunter2").await?;
//!
//! let board = QuestBoard::new(client, Arc::new(QueryCache::default()));
//! for quest in board.quests(PageQuery::default()).await?.items {
//!     println!("{} [{}] {}", quest.id, quest.status, quest.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod board;
pub mod client;
pub mod endpoints;

// Re-export primary types at crate root for convenience
pub use api::{CsrfToken, UsersPageSource};
pub use board::QuestBoard;
pub use client::{ApiClient, ClientConfig, DEFAULT_TIMEOUT, Query};
