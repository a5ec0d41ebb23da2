//! Resource APIs.
//!
//! Each module adds the calls for one resource to [`ApiClient`](crate::ApiClient).
//! Inputs are validated schema types; nothing unvalidated reaches the wire.

mod announcements;
mod auth;
mod comments;
mod contractors;
mod parties;
mod quests;
mod system;
mod users;

pub use auth::CsrfToken;
pub use users::UsersPageSource;
