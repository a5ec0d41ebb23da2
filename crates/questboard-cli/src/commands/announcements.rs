//! Announcement commands.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use questboard_core::schema::{AnnouncementDraft, AnnouncementPatch, Patch};

use super::{ListArgs, opt, parse_id};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct AnnouncementsCommand {
    #[command(subcommand)]
    pub command: AnnouncementsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AnnouncementsSubcommand {
    /// List announcements
    List(ListArgs),

    /// Fetch one announcement
    Get {
        /// Announcement id
        id: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Publish an announcement
    Create {
        #[command(flatten)]
        fields: AnnouncementFields,
    },

    /// Edit an announcement
    Update {
        /// Announcement id
        id: String,

        #[command(flatten)]
        fields: AnnouncementFields,

        /// Remove the expiry date
        #[arg(long, conflicts_with = "expires_at")]
        no_expiry: bool,
    },

    /// Delete an announcement
    Delete {
        /// Announcement id
        id: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct AnnouncementFields {
    /// Headline
    #[arg(long)]
    pub title: Option<String>,

    /// Body text
    #[arg(long)]
    pub message: Option<String>,

    /// low, normal or high
    #[arg(long)]
    pub importance: Option<String>,

    /// Expiry (RFC 3339)
    #[arg(long)]
    pub expires_at: Option<String>,

    /// Also notify by mail
    #[arg(long)]
    pub notify_mail: Option<bool>,

    /// Also send a push notification
    #[arg(long)]
    pub notify_push: Option<bool>,
}

impl AnnouncementFields {
    fn into_draft(self) -> AnnouncementDraft {
        AnnouncementDraft {
            title: opt(self.title),
            message: opt(self.message),
            importance: opt(self.importance),
            expires_at: opt(self.expires_at),
            notified_by_mail: opt(self.notify_mail),
            notified_by_push: opt(self.notify_push),
        }
    }
}

pub async fn handle(cmd: AnnouncementsCommand) -> Result<()> {
    let board = session::connect()?;

    match cmd.command {
        AnnouncementsSubcommand::List(args) => {
            let page = board
                .announcements(args.page()?)
                .await
                .context("Failed to list announcements")?;
            output::page(&page, args.pretty)
        }
        AnnouncementsSubcommand::Get { id, pretty } => {
            let announcement = board
                .announcement(parse_id(&id, "announcement")?)
                .await
                .context("Failed to fetch announcement")?;
            output::value(&announcement, pretty)
        }
        AnnouncementsSubcommand::Create { fields } => {
            let announcement = fields.into_draft().validate_create().context("Invalid announcement")?;
            let created = board
                .create_announcement(&announcement)
                .await
                .context("Failed to create announcement")?;
            output::success(&format!("Published announcement {}", created.announcement_id));
            Ok(())
        }
        AnnouncementsSubcommand::Update { id, fields, no_expiry } => {
            let id = parse_id(&id, "announcement")?;
            let mut draft = fields.into_draft();
            if no_expiry {
                draft.expires_at = Patch::Null;
            }
            let patch = draft.validate_partial().context("Invalid announcement fields")?;
            if patch == AnnouncementPatch::default() {
                bail!("Nothing to update. Pass at least one field flag.");
            }

            board
                .update_announcement(id, &patch)
                .await
                .context("Failed to update announcement")?;
            output::success(&format!("Updated announcement {id}"));
            Ok(())
        }
        AnnouncementsSubcommand::Delete { id } => {
            let id = parse_id(&id, "announcement")?;
            board
                .delete_announcement(id)
                .await
                .context("Failed to delete announcement")?;
            output::success(&format!("Deleted announcement {id}"));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_fills_defaults() {
        let announcement = AnnouncementFields {
            title: Some("Guild meeting".to_string()),
            message: Some("Friday at the tavern".to_string()),
            ..Default::default()
        }
        .into_draft()
        .validate_create()
        .unwrap();
        assert!(!announcement.notified_by_mail);
    }
}
