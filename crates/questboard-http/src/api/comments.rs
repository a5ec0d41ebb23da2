//! Quest comment calls.

use tracing::instrument;

use questboard_core::models::{Deleted, QuestComment};
use questboard_core::schema::{CommentPatch, NewComment, PageQuery};
use questboard_core::{EntityId, Page, Result};

use crate::client::{ApiClient, Query};
use crate::endpoints;

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn list_comments(&self, quest: EntityId, page: PageQuery) -> Result<Page<QuestComment>> {
        self.get(&endpoints::quest_comments(quest), &Query::new().page(page))
            .await
    }

    #[instrument(skip(self, comment))]
    pub async fn add_comment(&self, quest: EntityId, comment: &NewComment) -> Result<QuestComment> {
        self.post(&endpoints::quest_comments(quest), comment).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_comment(
        &self,
        quest: EntityId,
        comment: EntityId,
        patch: &CommentPatch,
    ) -> Result<QuestComment> {
        self.patch(&endpoints::quest_comment(quest, comment), patch)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(&self, quest: EntityId, comment: EntityId) -> Result<Deleted> {
        self.delete(&endpoints::quest_comment(quest, comment)).await
    }
}
