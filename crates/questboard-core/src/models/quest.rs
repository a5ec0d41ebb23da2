//! Quest-side resource models and their status machines.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::rules::Choice;
use crate::types::{EntityId, Timestamp, timestamp};

/// Lifecycle state of a quest.
///
/// The canonical flow is
/// `new_quest → open_call → take_quest_requested → doing → done → feedback → success | failed`,
/// with `pending` as a side state. Strings the client does not know decode to
/// [`QuestStatus::Unknown`] so listings keep working against newer servers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestStatus {
    NewQuest,
    OpenCall,
    TakeQuestRequested,
    Doing,
    Done,
    Feedback,
    Success,
    Failed,
    Pending,
    Unknown(String),
}

impl QuestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            QuestStatus::NewQuest => "new_quest",
            QuestStatus::OpenCall => "open_call",
            QuestStatus::TakeQuestRequested => "take_quest_requested",
            QuestStatus::Doing => "doing",
            QuestStatus::Done => "done",
            QuestStatus::Feedback => "feedback",
            QuestStatus::Success => "success",
            QuestStatus::Failed => "failed",
            QuestStatus::Pending => "pending",
            QuestStatus::Unknown(s) => s,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            QuestStatus::NewQuest => "new quest",
            QuestStatus::OpenCall => "open call",
            QuestStatus::TakeQuestRequested => "requested",
            QuestStatus::Doing => "in progress",
            QuestStatus::Done => "done (reported)",
            QuestStatus::Feedback => "feedback",
            QuestStatus::Success => "success",
            QuestStatus::Failed => "failed",
            QuestStatus::Pending => "pending",
            QuestStatus::Unknown(s) => s,
        }
    }

    /// Returns true once a quest has been closed either way.
    pub fn is_terminal(&self) -> bool {
        matches!(self, QuestStatus::Success | QuestStatus::Failed)
    }

    /// Whether the backend's state machine allows moving to `next`.
    pub fn can_transition_to(&self, next: &QuestStatus) -> bool {
        use QuestStatus::*;
        match (self, next) {
            (Unknown(_), _) | (_, Unknown(_)) => false,
            (NewQuest, OpenCall)
            | (OpenCall, TakeQuestRequested)
            | (TakeQuestRequested, Doing)
            | (TakeQuestRequested, OpenCall)
            | (Doing, Done)
            | (Done, Feedback)
            | (Feedback, Success)
            | (Feedback, Failed)
            | (Failed, OpenCall)
            | (Pending, OpenCall) => true,
            (from, Pending) => !from.is_terminal() && *from != Pending,
            _ => false,
        }
    }
}

impl From<String> for QuestStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "new_quest" => QuestStatus::NewQuest,
            "open_call" => QuestStatus::OpenCall,
            "take_quest_requested" => QuestStatus::TakeQuestRequested,
            "doing" => QuestStatus::Doing,
            "done" => QuestStatus::Done,
            "feedback" => QuestStatus::Feedback,
            "success" => QuestStatus::Success,
            "failed" => QuestStatus::Failed,
            "pending" => QuestStatus::Pending,
            _ => QuestStatus::Unknown(s),
        }
    }
}

impl From<QuestStatus> for String {
    fn from(status: QuestStatus) -> Self {
        match status {
            QuestStatus::Unknown(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a contractor application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractorStatus {
    Request,
    Accepted,
    Rejected,
    Unknown(String),
}

impl ContractorStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ContractorStatus::Request => "request",
            ContractorStatus::Accepted => "accepted",
            ContractorStatus::Rejected => "rejected",
            ContractorStatus::Unknown(s) => s,
        }
    }
}

impl From<String> for ContractorStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "request" => ContractorStatus::Request,
            "accepted" => ContractorStatus::Accepted,
            "rejected" => ContractorStatus::Rejected,
            _ => ContractorStatus::Unknown(s),
        }
    }
}

impl From<ContractorStatus> for String {
    fn from(status: ContractorStatus) -> Self {
        match status {
            ContractorStatus::Unknown(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ContractorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who may apply for a quest: a single user or a party.
///
/// This is the set the backend accepts on input. Responses use [`UnitKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    User,
    Party,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::User => "user",
            UnitType::Party => "party",
        }
    }
}

impl Choice for UnitType {
    const ALLOWED: &'static [&'static str] = &["user", "party"];

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "user" => Some(UnitType::User),
            "party" => Some(UnitType::Party),
            _ => None,
        }
    }
}

/// Kind of player unit named in a response.
///
/// Wider than [`UnitType`]: the backend also reports `unit`, and values the
/// client does not know decode to [`UnitKind::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UnitKind {
    User,
    Party,
    Unit,
    Unknown(String),
}

impl UnitKind {
    pub fn as_str(&self) -> &str {
        match self {
            UnitKind::User => "user",
            UnitKind::Party => "party",
            UnitKind::Unit => "unit",
            UnitKind::Unknown(s) => s,
        }
    }
}

impl From<UnitType> for UnitKind {
    fn from(unit: UnitType) -> Self {
        match unit {
            UnitType::User => UnitKind::User,
            UnitType::Party => UnitKind::Party,
        }
    }
}

impl From<String> for UnitKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "user" => UnitKind::User,
            "party" => UnitKind::Party,
            "unit" => UnitKind::Unit,
            _ => UnitKind::Unknown(s),
        }
    }
}

impl From<UnitKind> for String {
    fn from(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Unknown(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter grade for a numeric quest rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank(pub u8);

impl Rank {
    /// 4→S, 5→A, 6→B, 7→C, 8→D, 9→E, 10→F; anything else reads as F.
    pub fn alpha(self) -> char {
        match self.0 {
            4 => 'S',
            5 => 'A',
            6 => 'B',
            7 => 'C',
            8 => 'D',
            9 => 'E',
            _ => 'F',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alpha())
    }
}

/// A quest as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: EntityId,
    pub quest_owner_id: EntityId,
    pub title: String,
    pub rank: f64,
    pub status: QuestStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub party_required: bool,
    #[serde(with = "timestamp")]
    pub limit_date: Timestamp,
    #[serde(default, with = "timestamp::option")]
    pub open_call_start_date: Option<Timestamp>,
    #[serde(default, with = "timestamp::option")]
    pub open_call_end_date: Option<Timestamp>,
    #[serde(default)]
    pub assigned_target_id: Option<EntityId>,
    #[serde(default)]
    pub assigned_target_type: Option<UnitKind>,
    #[serde(default)]
    pub reword_point: f64,
    #[serde(default)]
    pub reword_items: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(with = "timestamp")]
    pub updated_at: Timestamp,
}

/// Wrapper the detail endpoint uses: `{ quest }`.
#[derive(Debug, Deserialize)]
pub struct QuestEnvelope {
    pub quest: Quest,
}

/// Author summary attached to a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentOwner {
    pub login_id: String,
}

/// A comment on a quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestComment {
    pub id: EntityId,
    pub quest_id: EntityId,
    pub comment_owner_id: EntityId,
    pub comment: Option<String>,
    #[serde(default)]
    pub comment_owner: Option<CommentOwner>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(with = "timestamp")]
    pub updated_at: Timestamp,
}

/// An application to undertake a quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestContractor {
    pub id: EntityId,
    pub quest_id: EntityId,
    pub contractor_unit_id: EntityId,
    pub contractor_unit_type: UnitKind,
    pub comment: Option<String>,
    pub status: ContractorStatus,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(with = "timestamp")]
    pub updated_at: Timestamp,
}

/// Wrapper the contractor detail endpoint uses: `{ contractor }`.
#[derive(Debug, Deserialize)]
pub struct ContractorEnvelope {
    pub contractor: QuestContractor,
}
