//! Quest comment commands.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use questboard_core::schema::{CommentDraft, Patch};

use super::{ListArgs, opt, parse_id};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CommentsCommand {
    #[command(subcommand)]
    pub command: CommentsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CommentsSubcommand {
    /// List comments on a quest
    List {
        /// Quest id
        quest: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Comment on a quest
    Add {
        /// Quest id
        quest: String,

        /// Comment text
        #[arg(long)]
        comment: String,

        /// Author user id (defaults to the signed-in user)
        #[arg(long)]
        owner: Option<String>,
    },

    /// Edit a comment
    Update {
        /// Quest id
        quest: String,

        /// Comment id
        comment_id: String,

        /// New comment text
        #[arg(long)]
        comment: Option<String>,

        /// New author user id
        #[arg(long)]
        owner: Option<String>,
    },

    /// Delete a comment
    Delete {
        /// Quest id
        quest: String,

        /// Comment id
        comment_id: String,
    },
}

pub async fn handle(cmd: CommentsCommand) -> Result<()> {
    let board = session::connect()?;

    match cmd.command {
        CommentsSubcommand::List { quest, list } => {
            let quest = parse_id(&quest, "quest")?;
            let page = board
                .comments(quest, list.page()?)
                .await
                .context("Failed to list comments")?;
            output::page(&page, list.pretty)
        }
        CommentsSubcommand::Add { quest, comment, owner } => {
            let quest = parse_id(&quest, "quest")?;
            let owner = match owner {
                Some(owner) => owner,
                None => board
                    .session()
                    .await
                    .context("Failed to look up the signed-in user")?
                    .id
                    .to_string(),
            };
            let comment = CommentDraft {
                comment_owner_id: Patch::Value(owner),
                comment: Patch::Value(comment),
            }
            .validate_create()
            .context("Invalid comment")?;

            let created = board.add_comment(quest, &comment).await.context("Failed to add comment")?;
            output::success(&format!("Added comment {}", created.id));
            Ok(())
        }
        CommentsSubcommand::Update {
            quest,
            comment_id,
            comment,
            owner,
        } => {
            if comment.is_none() && owner.is_none() {
                bail!("Nothing to update. Pass --comment or --owner.");
            }
            let quest = parse_id(&quest, "quest")?;
            let comment_id = parse_id(&comment_id, "comment")?;
            let patch = CommentDraft {
                comment_owner_id: opt(owner),
                comment: opt(comment),
            }
            .validate_partial()
            .context("Invalid comment fields")?;

            board
                .update_comment(quest, comment_id, &patch)
                .await
                .context("Failed to update comment")?;
            output::success(&format!("Updated comment {comment_id}"));
            Ok(())
        }
        CommentsSubcommand::Delete { quest, comment_id } => {
            let quest = parse_id(&quest, "quest")?;
            let comment_id = parse_id(&comment_id, "comment")?;
            board
                .delete_comment(quest, comment_id)
                .await
                .context("Failed to delete comment")?;
            output::success(&format!("Deleted comment {comment_id}"));
            Ok(())
        }
    }
}
