//! Resources as the backend returns them.

mod announcement;
mod party;
mod quest;
mod system;
mod user;

pub use announcement::{Announcement, AnnouncementCreated, AnnouncementEnvelope, Importance};
pub use party::{Party, PartyListItem, PartyMember};
pub use quest::{
    CommentOwner, ContractorEnvelope, ContractorStatus, Quest, QuestComment, QuestContractor, QuestEnvelope,
    QuestStatus, Rank, UnitKind, UnitType,
};
pub use system::{
    BackupCreated, BackupFile, ColumnInfo, DatabaseInfo, DatabaseInfoQuery, Deleted, ItemList, OperationLog, SchemaInfo,
    ServerInfo, TableInfo,
};
pub use user::{SessionEnvelope, SessionUser, UserOption, UserPublic};
