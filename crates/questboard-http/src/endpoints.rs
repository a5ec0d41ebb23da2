//! Endpoint paths, relative to `{prefix}/api/v1`.

use questboard_core::EntityId;

// ============================================================================
// Auth
// ============================================================================

/// CSRF token for the auth framework; answers `{ csrfToken }`.
pub const AUTH_CSRF: &str = "/auth/csrf";

/// Credentials sign-in callback.
pub const AUTH_SIGN_IN: &str = "/auth/callback/credentials";

/// Sign-out; takes a form-encoded `csrfToken`.
pub const AUTH_SIGN_OUT: &str = "/auth/signout";

/// Current session's user; answers `{ user }`.
pub const SESSION_INFO: &str = "/user/login-session-info";

// ============================================================================
// Quests
// ============================================================================

pub const QUESTS: &str = "/quests";

pub fn quest(id: EntityId) -> String {
    format!("{QUESTS}/{id}")
}

/// Lifecycle action on a quest: `done`, `close`, `feedback` or `restart`.
pub fn quest_action(id: EntityId, action: &str) -> String {
    format!("{QUESTS}/{id}/{action}")
}

pub fn quest_comments(id: EntityId) -> String {
    format!("{QUESTS}/{id}/comments")
}

pub fn quest_comment(id: EntityId, comment_id: EntityId) -> String {
    format!("{QUESTS}/{id}/comments/{comment_id}")
}

pub fn quest_contractors(id: EntityId) -> String {
    format!("{QUESTS}/{id}/contractors")
}

pub fn quest_contractor(id: EntityId, contractor_id: EntityId) -> String {
    format!("{QUESTS}/{id}/contractors/{contractor_id}")
}

/// `accept` or `reject` on a contractor application.
pub fn quest_contractor_action(id: EntityId, contractor_id: EntityId, action: &str) -> String {
    format!("{QUESTS}/{id}/contractors/{contractor_id}/{action}")
}

// ============================================================================
// Parties
// ============================================================================

pub const PARTIES: &str = "/parties";

pub fn party(id: EntityId) -> String {
    format!("{PARTIES}/{id}")
}

pub fn party_join_request(id: EntityId) -> String {
    format!("{PARTIES}/{id}/join-request")
}

/// `approve` or `reject` a pending join request.
pub fn party_join_decision(id: EntityId, decision: &str) -> String {
    format!("{PARTIES}/{id}/join-request/{decision}")
}

pub fn party_leave(id: EntityId) -> String {
    format!("{PARTIES}/{id}/leave")
}

pub fn party_member(id: EntityId, user_id: EntityId) -> String {
    format!("{PARTIES}/{id}/members/{user_id}")
}

// ============================================================================
// Users
// ============================================================================

/// User list, creation and bulk deletion.
pub const USERS: &str = "/users";

pub const USERS_BULK_ENABLE: &str = "/user/bulk-enable-users";

pub const USERS_BULK_DISABLE: &str = "/user/bulk-disable-users";

// ============================================================================
// Announcements
// ============================================================================

pub const ANNOUNCEMENTS: &str = "/announcements";

pub fn announcement(id: EntityId) -> String {
    format!("{ANNOUNCEMENTS}/{id}")
}

// ============================================================================
// System
// ============================================================================

pub const SYSTEM_BACKUPS: &str = "/system/database/backups";

pub const SYSTEM_BACKUP_CREATE: &str = "/system/database/backup";

pub const SYSTEM_OPERATION_LOGS: &str = "/system/database/operation-logs";

pub const SYSTEM_DATABASE_INFO: &str = "/system/database/info";

/// A backup file; the name is percent-encoded as a single path segment.
pub fn system_backup(filename: &str) -> String {
    format!("{SYSTEM_BACKUPS}/{}", urlencoding::encode(filename))
}
