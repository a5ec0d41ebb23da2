//! Core Quest Board types.
//!
//! These types enforce their invariants at construction time,
//! so invalid identifiers and URLs never reach the request layer.

mod base_url;
mod entity_id;
pub mod timestamp;

pub use base_url::BaseUrl;
pub use entity_id::EntityId;
pub use timestamp::Timestamp;
