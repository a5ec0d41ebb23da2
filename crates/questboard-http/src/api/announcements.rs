//! Announcement calls.

use tracing::{info, instrument};

use questboard_core::models::{Announcement, AnnouncementCreated, AnnouncementEnvelope, Deleted};
use questboard_core::schema::{AnnouncementPatch, NewAnnouncement, PageQuery};
use questboard_core::{EntityId, Page, Result};

use crate::client::{ApiClient, Query};
use crate::endpoints;

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn list_announcements(&self, page: PageQuery) -> Result<Page<Announcement>> {
        self.get(endpoints::ANNOUNCEMENTS, &Query::new().page(page))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_announcement(&self, id: EntityId) -> Result<Announcement> {
        let envelope: AnnouncementEnvelope = self.get(&endpoints::announcement(id), &Query::new()).await?;
        Ok(envelope.announcement)
    }

    /// Publish an announcement. The backend answers with the new id only.
    #[instrument(skip(self, announcement), fields(title = %announcement.title))]
    pub async fn create_announcement(&self, announcement: &NewAnnouncement) -> Result<AnnouncementCreated> {
        let created: AnnouncementCreated = self.post(endpoints::ANNOUNCEMENTS, announcement).await?;
        info!(id = %created.announcement_id, "announcement created");
        Ok(created)
    }

    /// Update an announcement. The endpoint takes `PUT` but only the fields
    /// present in `patch` are sent.
    #[instrument(skip(self, patch))]
    pub async fn update_announcement(&self, id: EntityId, patch: &AnnouncementPatch) -> Result<Announcement> {
        self.put(&endpoints::announcement(id), patch).await
    }

    #[instrument(skip(self))]
    pub async fn delete_announcement(&self, id: EntityId) -> Result<Deleted> {
        self.delete(&endpoints::announcement(id)).await
    }
}
