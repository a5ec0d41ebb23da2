//! Quest commands.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use questboard_core::schema::{Patch, QuestDraft};
use questboard_http::QuestBoard;

use super::{ListArgs, list, opt, parse_id};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct QuestsCommand {
    #[command(subcommand)]
    pub command: QuestsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum QuestsSubcommand {
    /// List quests
    List(ListArgs),

    /// Fetch a single quest
    Get(QuestIdArgs),

    /// Post a new quest
    Create(CreateArgs),

    /// Change fields of a quest
    Update(UpdateArgs),

    /// Delete a quest
    Delete(QuestIdArgs),

    /// Report a quest as done
    Done(QuestIdArgs),

    /// Close a quest as succeeded or failed
    Close(CloseArgs),

    /// Move a closed quest to feedback
    Feedback(QuestIdArgs),

    /// Reopen a failed or pending quest for applications
    Restart(QuestIdArgs),
}

#[derive(Args, Debug)]
pub struct QuestIdArgs {
    /// Quest id
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Quest fields settable from the command line.
#[derive(Args, Debug, Default)]
pub struct QuestFields {
    /// Quest title
    #[arg(long)]
    pub title: Option<String>,

    /// Difficulty rank (0-16)
    #[arg(long)]
    pub rank: Option<f64>,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,

    /// Whether only parties may take the quest
    #[arg(long)]
    pub party_required: Option<bool>,

    /// Deadline (RFC 3339)
    #[arg(long)]
    pub limit_date: Option<String>,

    /// Start of the open call (RFC 3339)
    #[arg(long)]
    pub open_call_start: Option<String>,

    /// End of the open call (RFC 3339)
    #[arg(long)]
    pub open_call_end: Option<String>,

    /// Reward points
    #[arg(long)]
    pub reword_point: Option<f64>,

    /// Reward item (repeatable)
    #[arg(long = "reword-item")]
    pub reword_items: Vec<String>,

    /// Video URL (repeatable)
    #[arg(long = "video")]
    pub videos: Vec<String>,

    /// Photo URL (repeatable)
    #[arg(long = "photo")]
    pub photos: Vec<String>,
}

impl QuestFields {
    fn into_draft(self, owner: Patch<String>) -> QuestDraft {
        QuestDraft {
            quest_owner_id: owner,
            title: opt(self.title),
            rank: opt(self.rank),
            description: opt(self.description),
            party_required: opt(self.party_required),
            limit_date: opt(self.limit_date),
            open_call_start_date: opt(self.open_call_start),
            open_call_end_date: opt(self.open_call_end),
            reword_point: opt(self.reword_point),
            reword_items: list(self.reword_items),
            videos: list(self.videos),
            photos: list(self.photos),
        }
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Owner user id (defaults to the signed-in user)
    #[arg(long)]
    pub owner: Option<String>,

    #[command(flatten)]
    pub fields: QuestFields,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Quest id
    pub id: String,

    /// New owner user id
    #[arg(long)]
    pub owner: Option<String>,

    #[command(flatten)]
    pub fields: QuestFields,
}

#[derive(Args, Debug)]
pub struct CloseArgs {
    /// Quest id
    pub id: String,

    /// Close the quest as failed instead of succeeded
    #[arg(long)]
    pub failed: bool,
}

pub async fn handle(cmd: QuestsCommand) -> Result<()> {
    let board = session::connect()?;

    match cmd.command {
        QuestsSubcommand::List(args) => {
            let page = board.quests(args.page()?).await.context("Failed to list quests")?;
            output::page(&page, args.pretty)
        }
        QuestsSubcommand::Get(args) => {
            let quest = board
                .quest(parse_id(&args.id, "quest")?)
                .await
                .context("Failed to fetch quest")?;
            output::value(&quest, args.pretty)
        }
        QuestsSubcommand::Create(args) => create(&board, args).await,
        QuestsSubcommand::Update(args) => {
            let id = parse_id(&args.id, "quest")?;
            let patch = args
                .fields
                .into_draft(opt(args.owner))
                .validate_partial()
                .context("Invalid quest fields")?;
            if patch.is_empty() {
                bail!("Nothing to update. Pass at least one field flag.");
            }
            let quest = board.update_quest(id, &patch).await.context("Failed to update quest")?;
            output::success(&format!("Updated quest {}", quest.id));
            Ok(())
        }
        QuestsSubcommand::Delete(args) => {
            let id = parse_id(&args.id, "quest")?;
            board.delete_quest(id).await.context("Failed to delete quest")?;
            output::success(&format!("Deleted quest {id}"));
            Ok(())
        }
        QuestsSubcommand::Done(args) => {
            let quest = board
                .done_quest(parse_id(&args.id, "quest")?)
                .await
                .context("Failed to report quest done")?;
            output::success(&format!("Quest {} is now {}", quest.id, quest.status.label()));
            Ok(())
        }
        QuestsSubcommand::Close(args) => {
            let quest = board
                .close_quest(parse_id(&args.id, "quest")?, !args.failed)
                .await
                .context("Failed to close quest")?;
            output::success(&format!("Quest {} is now {}", quest.id, quest.status.label()));
            Ok(())
        }
        QuestsSubcommand::Feedback(args) => {
            let quest = board
                .feedback_quest(parse_id(&args.id, "quest")?)
                .await
                .context("Failed to move quest to feedback")?;
            output::success(&format!("Quest {} is now {}", quest.id, quest.status.label()));
            Ok(())
        }
        QuestsSubcommand::Restart(args) => {
            let quest = board
                .restart_quest(parse_id(&args.id, "quest")?)
                .await
                .context("Failed to restart quest")?;
            output::success(&format!("Quest {} is now {}", quest.id, quest.status.label()));
            Ok(())
        }
    }
}

async fn create(board: &QuestBoard, args: CreateArgs) -> Result<()> {
    let owner = match args.owner {
        Some(owner) => owner,
        None => board
            .session()
            .await
            .context("Failed to look up the signed-in user")?
            .id
            .to_string(),
    };

    let quest = args
        .fields
        .into_draft(Patch::Value(owner))
        .validate_create()
        .context("Invalid quest")?;
    let created = board.create_quest(&quest).await.context("Failed to create quest")?;

    output::success("Quest created");
    println!();
    output::field("ID", &created.id.to_string());
    output::field("Status", created.status.label());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_stay_absent() {
        let draft = QuestFields {
            title: Some("Slay the dragon".to_string()),
            ..Default::default()
        }
        .into_draft(Patch::Absent);

        let patch = draft.validate_partial().unwrap();
        assert_eq!(patch.title.value().map(String::as_str), Some("Slay the dragon"));
        assert!(patch.rank.is_absent());
        assert!(patch.reword_items.is_absent());
    }

    #[test]
    fn create_requires_limit_date() {
        let err = QuestFields {
            title: Some("Slay the dragon".to_string()),
            rank: Some(5.0),
            ..Default::default()
        }
        .into_draft(Patch::Value("3b241101-e2bb-4255-8caf-4136c566a962".to_string()))
        .validate_create()
        .unwrap_err();
        assert!(err.has_field("limitDate"));
    }
}
