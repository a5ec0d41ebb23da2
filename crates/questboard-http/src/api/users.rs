//! User calls, including the fully drained user list.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument};

use questboard_core::models::{SessionEnvelope, SessionUser, UserOption, UserPublic};
use questboard_core::schema::{BulkUserIds, NewUser, PageQuery};
use questboard_core::{Page, PageSource, PagedFetcher, Result};

use crate::client::{ApiClient, Query};
use crate::endpoints;

impl ApiClient {
    /// List one page of users as raw items, decoded in the configured format.
    #[instrument(skip(self))]
    pub async fn list_users_raw(&self, page: PageQuery) -> Result<Page<Value>> {
        let data: Value = self.get(endpoints::USERS, &Query::new().page(page)).await?;
        self.user_list_format().decode(data, page.from, page.count)
    }

    /// List one page of users. Every item is validated; a bad item fails the
    /// page with a violation naming its absolute index.
    #[instrument(skip(self))]
    pub async fn list_users(&self, page: PageQuery) -> Result<Page<UserPublic>> {
        let raw = self.list_users_raw(page).await?;
        let from = raw.from as usize;
        let mut index = 0;
        raw.try_map(|item| {
            let user = UserPublic::from_item(item, from + index)?;
            index += 1;
            Ok(user)
        })
    }

    /// Fetch every user, `page_size` at a time, as picker options.
    #[instrument(skip(self))]
    pub async fn fetch_all_users(&self, page_size: u32) -> Result<Vec<UserOption>> {
        let source = UsersPageSource::new(self);
        PagedFetcher::new(page_size)
            .fetch_all(&source, |item, index| {
                Ok(UserOption::from(UserPublic::from_item(item, index)?))
            })
            .await
    }

    #[instrument(skip(self, user), fields(login_id = %user.login_id))]
    pub async fn create_user(&self, user: &NewUser) -> Result<()> {
        let _: Value = self.post(endpoints::USERS, user).await?;
        info!("user created");
        Ok(())
    }

    #[instrument(skip(self, ids), fields(count = ids.ids.len()))]
    pub async fn enable_users(&self, ids: &BulkUserIds) -> Result<()> {
        let _: Value = self.put(endpoints::USERS_BULK_ENABLE, ids).await?;
        Ok(())
    }

    #[instrument(skip(self, ids), fields(count = ids.ids.len()))]
    pub async fn disable_users(&self, ids: &BulkUserIds) -> Result<()> {
        let _: Value = self.put(endpoints::USERS_BULK_DISABLE, ids).await?;
        Ok(())
    }

    #[instrument(skip(self, ids), fields(count = ids.ids.len()))]
    pub async fn delete_users(&self, ids: &BulkUserIds) -> Result<()> {
        let _: Value = self.delete_with_body(endpoints::USERS, ids).await?;
        Ok(())
    }

    /// The user the current session belongs to.
    #[instrument(skip(self))]
    pub async fn session_info(&self) -> Result<SessionUser> {
        let envelope: SessionEnvelope = self.get(endpoints::SESSION_INFO, &Query::new()).await?;
        Ok(envelope.user)
    }
}

/// Serves raw `/users` pages to a [`PagedFetcher`].
#[derive(Debug, Clone, Copy)]
pub struct UsersPageSource<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersPageSource<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for UsersPageSource<'_> {
    type Item = Value;

    async fn fetch_page(&self, from: u32, count: u32) -> Result<Page<Value>> {
        self.client.list_users_raw(PageQuery { from, count }).await
    }
}
