//! Party input schemas.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::EntityId;

use super::Patch;
use super::quest::TEXT_MAX;
use super::rules::{Checker, Mode, Presence};

pub const PARTY_NAME_MAX: usize = 32;
pub const MEMBERS_MIN: i64 = 1;
pub const MEMBERS_MAX: i64 = 50;

/// Party form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartyDraft {
    pub party_name: Patch<String>,
    pub description: Patch<String>,
    pub max_number_of_members: Patch<f64>,
}

/// A validated party ready to be created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParty {
    pub party_name: String,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
    pub max_number_of_members: u8,
}

/// A validated partial party update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyPatch {
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub party_name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_absent")]
    pub max_number_of_members: Patch<u8>,
}

impl PartyPatch {
    pub fn is_empty(&self) -> bool {
        *self == PartyPatch::default()
    }
}

impl PartyDraft {
    pub fn validate_create(self) -> Result<NewParty, ValidationError> {
        let mut c = Checker::new();
        let p = self.check(Mode::Create, &mut c);
        match (p.party_name, p.max_number_of_members) {
            (Patch::Value(party_name), Patch::Value(max_number_of_members)) if c.is_clean() => Ok(NewParty {
                party_name,
                description: p.description,
                max_number_of_members,
            }),
            _ => Err(c.into_error()),
        }
    }

    pub fn validate_partial(self) -> Result<PartyPatch, ValidationError> {
        let mut c = Checker::new();
        let patch = self.check(Mode::Partial, &mut c);
        c.finish()?;
        Ok(patch)
    }

    fn check(self, mode: Mode, c: &mut Checker) -> PartyPatch {
        PartyPatch {
            party_name: c.check("partyName", self.party_name, mode.required(), |c, f, v| {
                c.text(f, v, 1, PARTY_NAME_MAX)
            }),
            description: c.check("description", self.description, Presence::Nullable, |c, f, v| {
                c.text(f, v, 0, TEXT_MAX)
            }),
            max_number_of_members: c.check(
                "maxNumberOfMembers",
                self.max_number_of_members,
                mode.required(),
                |c, f, v| c.int(f, v, MEMBERS_MIN, MEMBERS_MAX).map(|n| n as u8),
            ),
        }
    }
}

/// Body for approving or rejecting a join request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinDecision {
    pub user_id: EntityId,
}

impl JoinDecision {
    pub fn parse(user_id: &str) -> Result<Self, ValidationError> {
        let mut c = Checker::new();
        match c.uuid("userId", user_id.to_string()) {
            Some(user_id) => Ok(Self { user_id }),
            None => Err(c.into_error()),
        }
    }
}
