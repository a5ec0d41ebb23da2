//! Input schemas.
//!
//! Every resource has a loosely typed `*Draft` (what a form or command line
//! produces) with two validators: `validate_create`, which enforces required
//! fields and fills defaults, and `validate_partial`, which makes every field
//! optional and fills nothing. Only validated values are accepted by the
//! request layer.

mod announcement;
mod party;
mod patch;
mod query;
mod quest;
pub(crate) mod rules;
mod user;

pub use announcement::{AnnouncementDraft, AnnouncementPatch, NewAnnouncement};
pub use party::{JoinDecision, NewParty, PartyDraft, PartyPatch};
pub use patch::Patch;
pub use query::{PageQuery, PartyQuery};
pub use quest::{
    CommentDraft, CommentPatch, ContractorDraft, ContractorPatch, NewComment, NewContractor, NewQuest,
    QuestDraft, QuestPatch,
};
pub use user::{BulkUserIds, NewUser, UserDraft};

/// Field limits shared with callers that want to pre-check input.
pub mod limits {
    pub use super::party::{MEMBERS_MAX, MEMBERS_MIN, PARTY_NAME_MAX};
    pub use super::quest::{MEDIA_URL_MAX, RANK_MAX, REWORD_ITEM_MAX, REWORD_POINT_MAX, TEXT_MAX, TITLE_MAX};
    pub use super::user::{LOGIN_ID_MAX, PASSWORD_MAX};
}
