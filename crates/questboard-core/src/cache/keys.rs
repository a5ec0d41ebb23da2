//! Keys for every cached view.
//!
//! The functions ending in `_root` return invalidation prefixes rather than
//! keys of a single query.

use crate::models::DatabaseInfoQuery;
use crate::schema::{PageQuery, PartyQuery};
use crate::types::EntityId;

use super::CacheKey;

fn root(name: &str) -> CacheKey {
    CacheKey::new().with(name)
}

fn paged(key: CacheKey, page: PageQuery) -> CacheKey {
    key.with(page.from).with(page.count)
}

pub fn quests_root() -> CacheKey {
    root("quests")
}

/// `["quests", from, count]`
pub fn quests(page: PageQuery) -> CacheKey {
    paged(quests_root(), page)
}

/// `["quest", id]`, also the prefix of the quest's comments and contractors.
pub fn quest(id: EntityId) -> CacheKey {
    root("quest").with(id)
}

pub fn quest_comments_root(id: EntityId) -> CacheKey {
    quest(id).with("comments")
}

pub fn quest_comments(id: EntityId, page: PageQuery) -> CacheKey {
    paged(quest_comments_root(id), page)
}

pub fn quest_contractors_root(id: EntityId) -> CacheKey {
    quest(id).with("contractors")
}

pub fn quest_contractors(id: EntityId, page: PageQuery) -> CacheKey {
    paged(quest_contractors_root(id), page)
}

/// `["quest", id, "contractor", contractor_id]`
pub fn quest_contractor(id: EntityId, contractor_id: EntityId) -> CacheKey {
    quest(id).with("contractor").with(contractor_id)
}

pub fn parties_root() -> CacheKey {
    root("parties")
}

/// `["parties", from, count]`, followed by any leader or member filter.
pub fn parties(query: &PartyQuery) -> CacheKey {
    let mut key = paged(parties_root(), query.page);
    if let Some(leader) = query.leader_id_filter {
        key = key.with("leader").with(leader);
    }
    if let Some(member) = query.member_id_filter {
        key = key.with("member").with(member);
    }
    key
}

pub fn party(id: EntityId) -> CacheKey {
    root("party").with(id)
}

pub fn users_root() -> CacheKey {
    root("users")
}

pub fn users(page: PageQuery) -> CacheKey {
    paged(users_root(), page)
}

/// `["users", "all"]`: the fully drained user list.
pub fn users_all() -> CacheKey {
    users_root().with("all")
}

pub fn session() -> CacheKey {
    root("session")
}

pub fn announcements_root() -> CacheKey {
    root("announcements")
}

pub fn announcements(page: PageQuery) -> CacheKey {
    paged(announcements_root(), page)
}

pub fn announcement(id: EntityId) -> CacheKey {
    root("announcement").with(id)
}

pub fn system_root() -> CacheKey {
    root("system")
}

pub fn system_backups() -> CacheKey {
    system_root().with("backups")
}

/// `["system", "operation-logs", count]`
pub fn system_operation_logs(count: u32) -> CacheKey {
    system_root().with("operation-logs").with(count)
}

/// `["system", "database-info", include_columns, all_schemas]`
pub fn system_database_info(query: DatabaseInfoQuery) -> CacheKey {
    system_root()
        .with("database-info")
        .with(u32::from(query.include_columns))
        .with(u32::from(query.all_schemas))
}
