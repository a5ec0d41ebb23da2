//! Quest contractor commands.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use questboard_core::schema::{ContractorDraft, Patch};

use super::{ListArgs, opt, parse_id};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ContractorsCommand {
    #[command(subcommand)]
    pub command: ContractorsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ContractorsSubcommand {
    /// List applications for a quest
    List {
        /// Quest id
        quest: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Fetch one application
    Get {
        /// Quest id
        quest: String,

        /// Contractor id
        contractor: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Apply to take a quest
    Add {
        /// Quest id
        quest: String,

        /// Applying user or party id
        #[arg(long)]
        unit_id: String,

        /// Kind of applicant: user or party
        #[arg(long, default_value = "user")]
        unit_type: String,

        /// Note to the quest owner
        #[arg(long)]
        comment: Option<String>,
    },

    /// Change an application
    Update {
        /// Quest id
        quest: String,

        /// Contractor id
        contractor: String,

        /// Applying user or party id
        #[arg(long)]
        unit_id: Option<String>,

        /// Kind of applicant: user or party
        #[arg(long)]
        unit_type: Option<String>,

        /// Note to the quest owner
        #[arg(long)]
        comment: Option<String>,
    },

    /// Withdraw an application
    Delete {
        /// Quest id
        quest: String,

        /// Contractor id
        contractor: String,
    },

    /// Accept an application
    Accept {
        /// Quest id
        quest: String,

        /// Contractor id
        contractor: String,
    },

    /// Reject an application
    Reject {
        /// Quest id
        quest: String,

        /// Contractor id
        contractor: String,
    },
}

pub async fn handle(cmd: ContractorsCommand) -> Result<()> {
    let board = session::connect()?;

    match cmd.command {
        ContractorsSubcommand::List { quest, list } => {
            let quest = parse_id(&quest, "quest")?;
            let page = board
                .contractors(quest, list.page()?)
                .await
                .context("Failed to list contractors")?;
            output::page(&page, list.pretty)
        }
        ContractorsSubcommand::Get {
            quest,
            contractor,
            pretty,
        } => {
            let contractor = board
                .contractor(parse_id(&quest, "quest")?, parse_id(&contractor, "contractor")?)
                .await
                .context("Failed to fetch contractor")?;
            output::value(&contractor, pretty)
        }
        ContractorsSubcommand::Add {
            quest,
            unit_id,
            unit_type,
            comment,
        } => {
            let quest = parse_id(&quest, "quest")?;
            let application = ContractorDraft {
                contractor_unit_id: Patch::Value(unit_id),
                contractor_unit_type: Patch::Value(unit_type),
                comment: opt(comment),
            }
            .validate_create()
            .context("Invalid application")?;

            let created = board
                .add_contractor(quest, &application)
                .await
                .context("Failed to apply")?;
            output::success(&format!("Applied as contractor {}", created.id));
            Ok(())
        }
        ContractorsSubcommand::Update {
            quest,
            contractor,
            unit_id,
            unit_type,
            comment,
        } => {
            if unit_id.is_none() && unit_type.is_none() && comment.is_none() {
                bail!("Nothing to update. Pass at least one field flag.");
            }
            let quest = parse_id(&quest, "quest")?;
            let contractor = parse_id(&contractor, "contractor")?;
            let patch = ContractorDraft {
                contractor_unit_id: opt(unit_id),
                contractor_unit_type: opt(unit_type),
                comment: opt(comment),
            }
            .validate_partial()
            .context("Invalid application fields")?;

            board
                .update_contractor(quest, contractor, &patch)
                .await
                .context("Failed to update contractor")?;
            output::success(&format!("Updated contractor {contractor}"));
            Ok(())
        }
        ContractorsSubcommand::Delete { quest, contractor } => {
            let contractor_id = parse_id(&contractor, "contractor")?;
            board
                .delete_contractor(parse_id(&quest, "quest")?, contractor_id)
                .await
                .context("Failed to delete contractor")?;
            output::success(&format!("Deleted contractor {contractor_id}"));
            Ok(())
        }
        ContractorsSubcommand::Accept { quest, contractor } => {
            let updated = board
                .accept_contractor(parse_id(&quest, "quest")?, parse_id(&contractor, "contractor")?)
                .await
                .context("Failed to accept contractor")?;
            output::success(&format!("Contractor {} is now {}", updated.id, updated.status));
            Ok(())
        }
        ContractorsSubcommand::Reject { quest, contractor } => {
            let updated = board
                .reject_contractor(parse_id(&quest, "quest")?, parse_id(&contractor, "contractor")?)
                .await
                .context("Failed to reject contractor")?;
            output::success(&format!("Contractor {} is now {}", updated.id, updated.status));
            Ok(())
        }
    }
}
