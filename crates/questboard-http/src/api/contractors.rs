//! Contractor application calls.

use serde_json::json;
use tracing::{info, instrument};

use questboard_core::models::{ContractorEnvelope, Deleted, QuestContractor};
use questboard_core::schema::{ContractorPatch, NewContractor, PageQuery};
use questboard_core::{EntityId, Page, Result};

use crate::client::{ApiClient, Query};
use crate::endpoints;

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn list_contractors(&self, quest: EntityId, page: PageQuery) -> Result<Page<QuestContractor>> {
        self.get(&endpoints::quest_contractors(quest), &Query::new().page(page))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_contractor(&self, quest: EntityId, contractor: EntityId) -> Result<QuestContractor> {
        let envelope: ContractorEnvelope = self
            .get(&endpoints::quest_contractor(quest, contractor), &Query::new())
            .await?;
        Ok(envelope.contractor)
    }

    /// Apply to undertake a quest as a user or a party.
    #[instrument(skip(self, contractor))]
    pub async fn add_contractor(&self, quest: EntityId, contractor: &NewContractor) -> Result<QuestContractor> {
        self.post(&endpoints::quest_contractors(quest), contractor)
            .await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_contractor(
        &self,
        quest: EntityId,
        contractor: EntityId,
        patch: &ContractorPatch,
    ) -> Result<QuestContractor> {
        self.patch(&endpoints::quest_contractor(quest, contractor), patch)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_contractor(&self, quest: EntityId, contractor: EntityId) -> Result<Deleted> {
        self.delete(&endpoints::quest_contractor(quest, contractor))
            .await
    }

    #[instrument(skip(self))]
    pub async fn accept_contractor(&self, quest: EntityId, contractor: EntityId) -> Result<QuestContractor> {
        let accepted: QuestContractor = self
            .put(&endpoints::quest_contractor_action(quest, contractor, "accept"), &json!({}))
            .await?;
        info!(%quest, %contractor, "contractor accepted");
        Ok(accepted)
    }

    #[instrument(skip(self))]
    pub async fn reject_contractor(&self, quest: EntityId, contractor: EntityId) -> Result<QuestContractor> {
        self.put(&endpoints::quest_contractor_action(quest, contractor, "reject"), &json!({}))
            .await
    }
}
