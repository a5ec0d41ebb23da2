//! Database maintenance models.

use serde::{Deserialize, Serialize};

use crate::types::{Timestamp, timestamp};

/// A database backup file on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupFile {
    pub filename: String,
    pub size: u64,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
}

/// One entry of the maintenance operation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationLog {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    #[serde(default)]
    pub target_file: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub requested_by: Option<String>,
    #[serde(with = "timestamp")]
    pub requested_at: Timestamp,
}

/// Result of creating a backup: `{ path }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupCreated {
    #[serde(default)]
    pub path: Option<String>,
}

/// Database server summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub version: String,
    pub server_version: String,
    pub version_num: String,
    pub current_database: String,
    pub current_user: String,
    pub uptime_seconds: f64,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    #[serde(default)]
    pub columns: Option<Vec<ColumnInfo>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaInfo {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<TableInfo>,
}

/// Payload of `/system/database/info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub server: ServerInfo,
    #[serde(default)]
    pub schemas: Vec<SchemaInfo>,
}

/// Options for `/system/database/info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DatabaseInfoQuery {
    /// Include column details for every table.
    pub include_columns: bool,
    /// List every schema, not just the application's.
    pub all_schemas: bool,
}

/// List payload for backups and operation logs: `{ items }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemList<T> {
    pub items: Vec<T>,
}

/// Result of a delete call: `{ deleted }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: bool,
}
