//! Announcement resource models.

use serde::{Deserialize, Serialize};

use crate::schema::rules::Choice;
use crate::types::{EntityId, Timestamp, timestamp};

/// How prominently an announcement is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    #[default]
    Normal,
    High,
}

impl Choice for Importance {
    const ALLOWED: &'static [&'static str] = &["low", "normal", "high"];

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Importance::Low),
            "normal" => Some(Importance::Normal),
            "high" => Some(Importance::High),
            _ => None,
        }
    }
}

/// An announcement as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: EntityId,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default, with = "timestamp::option")]
    pub expires_at: Option<Timestamp>,
    #[serde(default)]
    pub notified_by_mail: bool,
    #[serde(default)]
    pub notified_by_push: bool,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(with = "timestamp")]
    pub updated_at: Timestamp,
}

/// Wrapper the detail endpoint uses: `{ announcement }`.
#[derive(Debug, Deserialize)]
pub struct AnnouncementEnvelope {
    pub announcement: Announcement,
}

/// What `POST /announcements` answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementCreated {
    pub announcement_id: EntityId,
}
