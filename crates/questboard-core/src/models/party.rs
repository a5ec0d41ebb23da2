//! Party resource models.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp, timestamp};

/// A row in the party list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyListItem {
    pub id: EntityId,
    pub party_name: String,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
}

/// A party member or pending applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyMember {
    pub id: EntityId,
    #[serde(default)]
    pub login_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Party detail, including its roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: EntityId,
    pub party_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub leader_id: EntityId,
    #[serde(default)]
    pub leader: Option<PartyMember>,
    #[serde(default)]
    pub max_number_of_members: Option<u8>,
    #[serde(default)]
    pub members: Vec<PartyMember>,
    #[serde(default)]
    pub pending_members: Vec<PartyMember>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(with = "timestamp")]
    pub updated_at: Timestamp,
}

impl Party {
    pub fn is_leader(&self, user: &EntityId) -> bool {
        self.leader_id == *user
    }

    pub fn is_member(&self, user: &EntityId) -> bool {
        self.members.iter().any(|m| m.id == *user)
    }

    pub fn is_pending(&self, user: &EntityId) -> bool {
        self.pending_members.iter().any(|m| m.id == *user)
    }
}
