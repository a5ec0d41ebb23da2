//! Database maintenance commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use questboard_core::models::{DatabaseInfo, DatabaseInfoQuery};

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct SystemCommand {
    #[command(subcommand)]
    pub command: SystemSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SystemSubcommand {
    /// List database backups
    Backups {
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Take a database backup
    Backup,

    /// Delete a backup file
    DeleteBackup {
        /// Backup file name
        filename: String,
    },

    /// Show recent maintenance operations
    Logs {
        /// Number of entries
        #[arg(long, default_value_t = 20)]
        count: u32,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Describe the database server and its tables
    DbInfo {
        /// Include column details
        #[arg(long)]
        columns: bool,

        /// List every schema, not just the application's
        #[arg(long)]
        all_schemas: bool,

        /// Print the raw JSON payload
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle(cmd: SystemCommand) -> Result<()> {
    let board = session::connect()?;

    match cmd.command {
        SystemSubcommand::Backups { pretty } => {
            let backups = board.backups().await.context("Failed to list backups")?;
            output::items(&backups, pretty)
        }
        SystemSubcommand::Backup => {
            let created = board.create_backup().await.context("Failed to create backup")?;
            output::success("Backup created");
            if let Some(path) = &created.path {
                output::field("Path", path);
            }
            Ok(())
        }
        SystemSubcommand::DeleteBackup { filename } => {
            board
                .delete_backup(&filename)
                .await
                .context("Failed to delete backup")?;
            output::success(&format!("Deleted backup {filename}"));
            Ok(())
        }
        SystemSubcommand::Logs { count, pretty } => {
            let logs = board
                .operation_logs(count)
                .await
                .context("Failed to fetch operation logs")?;
            output::items(&logs, pretty)
        }
        SystemSubcommand::DbInfo {
            columns,
            all_schemas,
            json,
        } => {
            let options = DatabaseInfoQuery {
                include_columns: columns,
                all_schemas,
            };
            let info = board
                .database_info(options)
                .await
                .context("Failed to fetch database info")?;
            if json {
                output::json_pretty(&info)
            } else {
                print_database_info(&info);
                Ok(())
            }
        }
    }
}

fn print_database_info(info: &DatabaseInfo) {
    let server = &info.server;
    output::field("Server", &server.server_version);
    output::field("Database", &server.current_database);
    output::field("User", &server.current_user);
    output::field("Uptime", &format!("{:.0}s", server.uptime_seconds));
    output::field("Size", &format!("{} bytes", server.size_bytes));

    for schema in &info.schemas {
        println!();
        println!("{} ({} tables)", schema.name.bold(), schema.tables.len());
        for table in &schema.tables {
            println!("  {}", table.name);
            for column in table.columns.iter().flatten() {
                let nullable = if column.is_nullable { "" } else { " not null" };
                println!("    {} {}{}", column.name, column.data_type.dimmed(), nullable);
            }
        }
    }
}
