//! Cached access to the API.
//!
//! [`QuestBoard`] is what a UI holds on to. Reads go through the query cache
//! under the keys in [`questboard_core::cache::keys`]; every mutation
//! invalidates exactly the views it can change, and only once the server has
//! confirmed it.

use std::sync::Arc;

use questboard_core::cache::{CacheKey, QueryCache, Subscription, keys};
use questboard_core::models::{
    Announcement, AnnouncementCreated, BackupCreated, BackupFile, DatabaseInfo, DatabaseInfoQuery, Deleted,
    OperationLog, Party, PartyListItem, Quest, QuestComment, QuestContractor, SessionUser, UserOption, UserPublic,
};
use questboard_core::schema::{
    AnnouncementPatch, BulkUserIds, CommentPatch, ContractorPatch, JoinDecision, NewAnnouncement, NewComment,
    NewContractor, NewParty, NewQuest, NewUser, PageQuery, PartyPatch, PartyQuery, QuestPatch,
};
use questboard_core::{EntityId, Page, Result};

use crate::client::ApiClient;

/// The API client paired with a query cache.
#[derive(Debug, Clone)]
pub struct QuestBoard {
    client: ApiClient,
    cache: Arc<QueryCache>,
}

/// Read `$key` through the cache, fetching with a clone of the client.
macro_rules! cached {
    ($self:ident, $key:expr, |$client:ident| $fetch:expr) => {{
        let $client = $self.client.clone();
        $self.cache.read(&$key, move || async move { $fetch.await }).await
    }};
}

impl QuestBoard {
    pub fn new(client: ApiClient, cache: Arc<QueryCache>) -> Self {
        Self { client, cache }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Watch a view for invalidation.
    pub fn subscribe(&self, key: &CacheKey) -> Subscription {
        self.cache.subscribe(key)
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    pub async fn session(&self) -> Result<SessionUser> {
        cached!(self, keys::session(), |client| client.session_info())
    }

    /// Sign in. Everything cached belonged to the previous session and is
    /// dropped.
    pub async fn sign_in(&self, login_id: &str, password: &str) -> Result<SessionUser> {
        let user = self.client.sign_in(login_id, password).await?;
        self.cache.clear();
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.client.sign_out().await?;
        self.cache.clear();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Quests
    // ------------------------------------------------------------------

    pub async fn quests(&self, page: PageQuery) -> Result<Page<Quest>> {
        cached!(self, keys::quests(page), |client| client.list_quests(page))
    }

    pub async fn quest(&self, id: EntityId) -> Result<Quest> {
        cached!(self, keys::quest(id), |client| client.get_quest(id))
    }

    pub async fn create_quest(&self, quest: &NewQuest) -> Result<Quest> {
        self.cache
            .mutate(&[keys::quests_root()], self.client.create_quest(quest))
            .await
    }

    pub async fn update_quest(&self, id: EntityId, patch: &QuestPatch) -> Result<Quest> {
        self.cache
            .mutate(&quest_changed(id), self.client.update_quest(id, patch))
            .await
    }

    pub async fn delete_quest(&self, id: EntityId) -> Result<Deleted> {
        self.cache
            .mutate(&quest_changed(id), self.client.delete_quest(id))
            .await
    }

    pub async fn done_quest(&self, id: EntityId) -> Result<Quest> {
        self.cache
            .mutate(&quest_changed(id), self.client.done_quest(id))
            .await
    }

    pub async fn close_quest(&self, id: EntityId, success: bool) -> Result<Quest> {
        self.cache
            .mutate(&quest_changed(id), self.client.close_quest(id, success))
            .await
    }

    pub async fn feedback_quest(&self, id: EntityId) -> Result<Quest> {
        self.cache
            .mutate(&quest_changed(id), self.client.feedback_quest(id))
            .await
    }

    pub async fn restart_quest(&self, id: EntityId) -> Result<Quest> {
        self.cache
            .mutate(&quest_changed(id), self.client.restart_quest(id))
            .await
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    pub async fn comments(&self, quest: EntityId, page: PageQuery) -> Result<Page<QuestComment>> {
        cached!(self, keys::quest_comments(quest, page), |client| client
            .list_comments(quest, page))
    }

    pub async fn add_comment(&self, quest: EntityId, comment: &NewComment) -> Result<QuestComment> {
        self.cache
            .mutate(&[keys::quest_comments_root(quest)], self.client.add_comment(quest, comment))
            .await
    }

    pub async fn update_comment(
        &self,
        quest: EntityId,
        comment: EntityId,
        patch: &CommentPatch,
    ) -> Result<QuestComment> {
        self.cache
            .mutate(
                &[keys::quest_comments_root(quest)],
                self.client.update_comment(quest, comment, patch),
            )
            .await
    }

    pub async fn delete_comment(&self, quest: EntityId, comment: EntityId) -> Result<Deleted> {
        self.cache
            .mutate(&[keys::quest_comments_root(quest)], self.client.delete_comment(quest, comment))
            .await
    }

    // ------------------------------------------------------------------
    // Contractors
    // ------------------------------------------------------------------

    pub async fn contractors(&self, quest: EntityId, page: PageQuery) -> Result<Page<QuestContractor>> {
        cached!(self, keys::quest_contractors(quest, page), |client| client
            .list_contractors(quest, page))
    }

    pub async fn contractor(&self, quest: EntityId, contractor: EntityId) -> Result<QuestContractor> {
        cached!(self, keys::quest_contractor(quest, contractor), |client| client
            .get_contractor(quest, contractor))
    }

    pub async fn add_contractor(&self, quest: EntityId, contractor: &NewContractor) -> Result<QuestContractor> {
        self.cache
            .mutate(&contractors_changed(quest), self.client.add_contractor(quest, contractor))
            .await
    }

    pub async fn update_contractor(
        &self,
        quest: EntityId,
        contractor: EntityId,
        patch: &ContractorPatch,
    ) -> Result<QuestContractor> {
        self.cache
            .mutate(
                &contractors_changed(quest),
                self.client.update_contractor(quest, contractor, patch),
            )
            .await
    }

    pub async fn delete_contractor(&self, quest: EntityId, contractor: EntityId) -> Result<Deleted> {
        self.cache
            .mutate(&contractors_changed(quest), self.client.delete_contractor(quest, contractor))
            .await
    }

    pub async fn accept_contractor(&self, quest: EntityId, contractor: EntityId) -> Result<QuestContractor> {
        self.cache
            .mutate(&contractors_changed(quest), self.client.accept_contractor(quest, contractor))
            .await
    }

    pub async fn reject_contractor(&self, quest: EntityId, contractor: EntityId) -> Result<QuestContractor> {
        self.cache
            .mutate(&contractors_changed(quest), self.client.reject_contractor(quest, contractor))
            .await
    }

    // ------------------------------------------------------------------
    // Parties
    // ------------------------------------------------------------------

    pub async fn parties(&self, query: &PartyQuery) -> Result<Page<PartyListItem>> {
        let query = query.clone();
        cached!(self, keys::parties(&query), |client| client.list_parties(&query))
    }

    pub async fn party(&self, id: EntityId) -> Result<Party> {
        cached!(self, keys::party(id), |client| client.get_party(id))
    }

    pub async fn create_party(&self, party: &NewParty) -> Result<Party> {
        self.cache
            .mutate(&[keys::parties_root()], self.client.create_party(party))
            .await
    }

    pub async fn update_party(&self, id: EntityId, patch: &PartyPatch) -> Result<Party> {
        self.cache
            .mutate(&party_changed(id), self.client.update_party(id, patch))
            .await
    }

    pub async fn delete_party(&self, id: EntityId) -> Result<Deleted> {
        self.cache
            .mutate(&party_changed(id), self.client.delete_party(id))
            .await
    }

    pub async fn request_join(&self, id: EntityId) -> Result<()> {
        self.cache
            .mutate(&[keys::party(id)], self.client.request_join(id))
            .await
    }

    pub async fn approve_join(&self, id: EntityId, decision: &JoinDecision) -> Result<()> {
        self.cache
            .mutate(&[keys::party(id)], self.client.approve_join(id, decision))
            .await
    }

    pub async fn reject_join(&self, id: EntityId, decision: &JoinDecision) -> Result<()> {
        self.cache
            .mutate(&[keys::party(id)], self.client.reject_join(id, decision))
            .await
    }

    pub async fn leave_party(&self, id: EntityId) -> Result<()> {
        self.cache
            .mutate(&[keys::party(id)], self.client.leave_party(id))
            .await
    }

    pub async fn remove_member(&self, id: EntityId, user: EntityId) -> Result<()> {
        self.cache
            .mutate(&[keys::party(id)], self.client.remove_member(id, user))
            .await
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn users(&self, page: PageQuery) -> Result<Page<UserPublic>> {
        cached!(self, keys::users(page), |client| client.list_users(page))
    }

    /// Every user as a picker option, drained `page_size` at a time.
    pub async fn all_users(&self, page_size: u32) -> Result<Vec<UserOption>> {
        cached!(self, keys::users_all(), |client| client.fetch_all_users(page_size))
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<()> {
        self.cache
            .mutate(&[keys::users_root()], self.client.create_user(user))
            .await
    }

    pub async fn enable_users(&self, ids: &BulkUserIds) -> Result<()> {
        self.cache
            .mutate(&[keys::users_root()], self.client.enable_users(ids))
            .await
    }

    pub async fn disable_users(&self, ids: &BulkUserIds) -> Result<()> {
        self.cache
            .mutate(&[keys::users_root()], self.client.disable_users(ids))
            .await
    }

    pub async fn delete_users(&self, ids: &BulkUserIds) -> Result<()> {
        self.cache
            .mutate(&[keys::users_root()], self.client.delete_users(ids))
            .await
    }

    // ------------------------------------------------------------------
    // Announcements
    // ------------------------------------------------------------------

    pub async fn announcements(&self, page: PageQuery) -> Result<Page<Announcement>> {
        cached!(self, keys::announcements(page), |client| client
            .list_announcements(page))
    }

    pub async fn announcement(&self, id: EntityId) -> Result<Announcement> {
        cached!(self, keys::announcement(id), |client| client.get_announcement(id))
    }

    pub async fn create_announcement(&self, announcement: &NewAnnouncement) -> Result<AnnouncementCreated> {
        self.cache
            .mutate(&[keys::announcements_root()], self.client.create_announcement(announcement))
            .await
    }

    pub async fn update_announcement(&self, id: EntityId, patch: &AnnouncementPatch) -> Result<Announcement> {
        self.cache
            .mutate(&announcement_changed(id), self.client.update_announcement(id, patch))
            .await
    }

    pub async fn delete_announcement(&self, id: EntityId) -> Result<Deleted> {
        self.cache
            .mutate(&announcement_changed(id), self.client.delete_announcement(id))
            .await
    }

    // ------------------------------------------------------------------
    // System
    // ------------------------------------------------------------------

    pub async fn backups(&self) -> Result<Vec<BackupFile>> {
        cached!(self, keys::system_backups(), |client| client.list_backups())
    }

    pub async fn operation_logs(&self, count: u32) -> Result<Vec<OperationLog>> {
        cached!(self, keys::system_operation_logs(count), |client| client
            .operation_logs(count))
    }

    pub async fn database_info(&self, options: DatabaseInfoQuery) -> Result<DatabaseInfo> {
        cached!(self, keys::system_database_info(options), |client| client
            .database_info(options))
    }

    pub async fn create_backup(&self) -> Result<BackupCreated> {
        self.cache
            .mutate(&[keys::system_root()], self.client.create_backup())
            .await
    }

    pub async fn delete_backup(&self, filename: &str) -> Result<()> {
        self.cache
            .mutate(&[keys::system_root()], self.client.delete_backup(filename))
            .await
    }
}

fn quest_changed(id: EntityId) -> [CacheKey; 2] {
    [keys::quests_root(), keys::quest(id)]
}

fn contractors_changed(quest: EntityId) -> [CacheKey; 2] {
    [keys::quest_contractors_root(quest), keys::quest(quest)]
}

fn party_changed(id: EntityId) -> [CacheKey; 2] {
    [keys::parties_root(), keys::party(id)]
}

fn announcement_changed(id: EntityId) -> [CacheKey; 2] {
    [keys::announcements_root(), keys::announcement(id)]
}
