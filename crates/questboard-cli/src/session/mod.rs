//! Persisted CLI session.
//!
//! The backend authenticates with cookies, so a session is the base URL the
//! user signed in to plus the cookies its client held afterwards.

pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use questboard_core::{BaseUrl, ListFormat, QueryCache};
use questboard_http::{ApiClient, ClientConfig, QuestBoard};

/// Session data written to `session.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub base_url: BaseUrl,
    pub cookies: Option<String>,
}

impl StoredSession {
    /// Capture the state of a signed-in client.
    pub fn capture(client: &ApiClient) -> Self {
        Self {
            base_url: client.base_url().clone(),
            cookies: client.export_cookies(),
        }
    }
}

/// Build a board with a fresh cache.
pub fn board(config: ClientConfig) -> Result<QuestBoard> {
    let client = ApiClient::new(config).context("Failed to create HTTP client")?;
    Ok(QuestBoard::new(client, Arc::new(QueryCache::default())))
}

/// Load the stored session and build a board carrying its cookies.
pub fn connect() -> Result<QuestBoard> {
    connect_with_format(ListFormat::Current)
}

/// Like [`connect`], decoding the user list in `format`.
pub fn connect_with_format(format: ListFormat) -> Result<QuestBoard> {
    let stored = storage::load_session()
        .context("Failed to load session")?
        .context("No active session. Run 'questboard login' first.")?;

    let config = ClientConfig::new(stored.base_url).with_user_list_format(format);
    let board = board(config)?;
    match &stored.cookies {
        Some(cookies) => board.client().restore_cookies(cookies),
        None => tracing::warn!("stored session has no cookies"),
    }
    Ok(board)
}
