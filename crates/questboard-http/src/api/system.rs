//! Database maintenance calls. Guild staff only.

use serde_json::Value;
use tracing::{info, instrument};

use questboard_core::models::{BackupCreated, BackupFile, DatabaseInfo, DatabaseInfoQuery, ItemList, OperationLog};
use questboard_core::Result;

use crate::client::{ApiClient, Query};
use crate::endpoints;

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn list_backups(&self) -> Result<Vec<BackupFile>> {
        let list: ItemList<BackupFile> = self.get(endpoints::SYSTEM_BACKUPS, &Query::new()).await?;
        Ok(list.items)
    }

    #[instrument(skip(self))]
    pub async fn create_backup(&self) -> Result<BackupCreated> {
        let created: BackupCreated = self
            .post(endpoints::SYSTEM_BACKUP_CREATE, &serde_json::json!({}))
            .await?;
        info!(path = ?created.path, "backup created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn delete_backup(&self, filename: &str) -> Result<()> {
        let _: Value = self.delete(&endpoints::system_backup(filename)).await?;
        info!(filename, "backup deleted");
        Ok(())
    }

    /// The most recent `count` maintenance operations.
    #[instrument(skip(self))]
    pub async fn operation_logs(&self, count: u32) -> Result<Vec<OperationLog>> {
        let query = Query::new().param("count", count);
        let list: ItemList<OperationLog> = self.get(endpoints::SYSTEM_OPERATION_LOGS, &query).await?;
        Ok(list.items)
    }

    #[instrument(skip(self))]
    pub async fn database_info(&self, options: DatabaseInfoQuery) -> Result<DatabaseInfo> {
        let query = Query::new()
            .opt("includeColumns", options.include_columns.then_some("true"))
            .opt("schema", options.all_schemas.then_some("all"));
        self.get(endpoints::SYSTEM_DATABASE_INFO, &query).await
    }
}
