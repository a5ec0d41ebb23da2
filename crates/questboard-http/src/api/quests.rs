//! Quest calls.

use serde_json::json;
use tracing::{info, instrument};

use questboard_core::models::{Deleted, Quest, QuestEnvelope};
use questboard_core::schema::{NewQuest, PageQuery, QuestPatch};
use questboard_core::{EntityId, Page, Result};

use crate::client::{ApiClient, Query};
use crate::endpoints;

impl ApiClient {
    /// List quests.
    #[instrument(skip(self))]
    pub async fn list_quests(&self, page: PageQuery) -> Result<Page<Quest>> {
        self.get(endpoints::QUESTS, &Query::new().page(page)).await
    }

    /// Fetch one quest.
    #[instrument(skip(self))]
    pub async fn get_quest(&self, id: EntityId) -> Result<Quest> {
        let envelope: QuestEnvelope = self.get(&endpoints::quest(id), &Query::new()).await?;
        Ok(envelope.quest)
    }

    #[instrument(skip(self, quest), fields(title = %quest.title))]
    pub async fn create_quest(&self, quest: &NewQuest) -> Result<Quest> {
        let created: Quest = self.post(endpoints::QUESTS, quest).await?;
        info!(id = %created.id, "quest created");
        Ok(created)
    }

    /// Update the fields set in `patch`; the rest are left alone.
    #[instrument(skip(self, patch))]
    pub async fn update_quest(&self, id: EntityId, patch: &QuestPatch) -> Result<Quest> {
        self.patch(&endpoints::quest(id), patch).await
    }

    #[instrument(skip(self))]
    pub async fn delete_quest(&self, id: EntityId) -> Result<Deleted> {
        self.delete(&endpoints::quest(id)).await
    }

    /// Report the quest as done.
    #[instrument(skip(self))]
    pub async fn done_quest(&self, id: EntityId) -> Result<Quest> {
        self.put(&endpoints::quest_action(id, "done"), &json!({})).await
    }

    /// Close the quest as a success or a failure.
    #[instrument(skip(self))]
    pub async fn close_quest(&self, id: EntityId, success: bool) -> Result<Quest> {
        let query = Query::new().param("success", success);
        self.put_with_query(&endpoints::quest_action(id, "close"), &query, &json!({}))
            .await
    }

    /// Move the quest into the feedback phase.
    #[instrument(skip(self))]
    pub async fn feedback_quest(&self, id: EntityId) -> Result<Quest> {
        self.put(&endpoints::quest_action(id, "feedback"), &json!({})).await
    }

    /// Reopen a failed or pending quest for applications.
    #[instrument(skip(self))]
    pub async fn restart_quest(&self, id: EntityId) -> Result<Quest> {
        self.put(&endpoints::quest_action(id, "restart"), &json!({})).await
    }
}
