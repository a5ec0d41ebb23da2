//! Party calls.

use serde_json::Value;
use tracing::{info, instrument};

use questboard_core::models::{Deleted, Party, PartyListItem};
use questboard_core::schema::{JoinDecision, NewParty, PartyPatch, PartyQuery};
use questboard_core::{EntityId, Page, Result};

use crate::client::{ApiClient, Query};
use crate::endpoints;

impl ApiClient {
    /// List parties, optionally only those led by or including a user.
    #[instrument(skip(self))]
    pub async fn list_parties(&self, query: &PartyQuery) -> Result<Page<PartyListItem>> {
        let params = Query::new()
            .page(query.page)
            .opt("leaderIdFilter", query.leader_id_filter)
            .opt("memberIdFilter", query.member_id_filter);
        self.get(endpoints::PARTIES, &params).await
    }

    #[instrument(skip(self))]
    pub async fn get_party(&self, id: EntityId) -> Result<Party> {
        self.get(&endpoints::party(id), &Query::new()).await
    }

    #[instrument(skip(self, party), fields(name = %party.party_name))]
    pub async fn create_party(&self, party: &NewParty) -> Result<Party> {
        let created: Party = self.post(endpoints::PARTIES, party).await?;
        info!(id = %created.id, "party created");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_party(&self, id: EntityId, patch: &PartyPatch) -> Result<Party> {
        self.patch(&endpoints::party(id), patch).await
    }

    #[instrument(skip(self))]
    pub async fn delete_party(&self, id: EntityId) -> Result<Deleted> {
        self.delete(&endpoints::party(id)).await
    }

    /// Ask to join a party as the signed-in user.
    #[instrument(skip(self))]
    pub async fn request_join(&self, id: EntityId) -> Result<()> {
        let _: Value = self
            .put(&endpoints::party_join_request(id), &serde_json::json!({}))
            .await?;
        Ok(())
    }

    /// Accept a pending applicant. Leader only.
    #[instrument(skip(self))]
    pub async fn approve_join(&self, id: EntityId, decision: &JoinDecision) -> Result<()> {
        let _: Value = self
            .post(&endpoints::party_join_decision(id, "approve"), decision)
            .await?;
        Ok(())
    }

    /// Turn down a pending applicant. Leader only.
    #[instrument(skip(self))]
    pub async fn reject_join(&self, id: EntityId, decision: &JoinDecision) -> Result<()> {
        let _: Value = self
            .post(&endpoints::party_join_decision(id, "reject"), decision)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn leave_party(&self, id: EntityId) -> Result<()> {
        let _: Value = self
            .post(&endpoints::party_leave(id), &serde_json::json!({}))
            .await?;
        Ok(())
    }

    /// Remove a member from a party. Leader only.
    #[instrument(skip(self))]
    pub async fn remove_member(&self, id: EntityId, user: EntityId) -> Result<()> {
        let _: Value = self.delete(&endpoints::party_member(id, user)).await?;
        Ok(())
    }
}
