//! Party commands.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use questboard_core::schema::{JoinDecision, PartyDraft, PartyQuery};

use super::{ListArgs, opt, parse_id};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct PartiesCommand {
    #[command(subcommand)]
    pub command: PartiesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PartiesSubcommand {
    /// List parties
    List {
        /// Only parties led by this user
        #[arg(long)]
        leader: Option<String>,

        /// Only parties this user belongs to
        #[arg(long)]
        member: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Fetch a party with its roster
    Get {
        /// Party id
        id: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Form a new party
    Create {
        /// Party name
        #[arg(long)]
        name: String,

        /// Party description
        #[arg(long)]
        description: Option<String>,

        /// Member limit (1-50)
        #[arg(long)]
        max_members: f64,
    },

    /// Change party details
    Update {
        /// Party id
        id: String,

        /// Party name
        #[arg(long)]
        name: Option<String>,

        /// Party description
        #[arg(long)]
        description: Option<String>,

        /// Member limit (1-50)
        #[arg(long)]
        max_members: Option<f64>,
    },

    /// Disband a party
    Delete {
        /// Party id
        id: String,
    },

    /// Ask to join a party
    Join {
        /// Party id
        id: String,
    },

    /// Approve a pending join request
    Approve {
        /// Party id
        id: String,

        /// Applicant user id
        #[arg(long)]
        user: String,
    },

    /// Reject a pending join request
    Reject {
        /// Party id
        id: String,

        /// Applicant user id
        #[arg(long)]
        user: String,
    },

    /// Leave a party
    Leave {
        /// Party id
        id: String,
    },

    /// Remove a member from a party
    RemoveMember {
        /// Party id
        id: String,

        /// Member user id
        user: String,
    },
}

pub async fn handle(cmd: PartiesCommand) -> Result<()> {
    let board = session::connect()?;

    match cmd.command {
        PartiesSubcommand::List { leader, member, list } => {
            let query = PartyQuery::new(list.page()?, leader.as_deref(), member.as_deref())
                .context("Invalid party filters")?;
            let page = board.parties(&query).await.context("Failed to list parties")?;
            output::page(&page, list.pretty)
        }
        PartiesSubcommand::Get { id, pretty } => {
            let party = board
                .party(parse_id(&id, "party")?)
                .await
                .context("Failed to fetch party")?;
            output::value(&party, pretty)
        }
        PartiesSubcommand::Create {
            name,
            description,
            max_members,
        } => {
            let party = PartyDraft {
                party_name: name.into(),
                description: opt(description),
                max_number_of_members: max_members.into(),
            }
            .validate_create()
            .context("Invalid party")?;

            let created = board.create_party(&party).await.context("Failed to create party")?;
            output::success(&format!("Formed party {}", created.id));
            Ok(())
        }
        PartiesSubcommand::Update {
            id,
            name,
            description,
            max_members,
        } => {
            let id = parse_id(&id, "party")?;
            let patch = PartyDraft {
                party_name: opt(name),
                description: opt(description),
                max_number_of_members: opt(max_members),
            }
            .validate_partial()
            .context("Invalid party fields")?;
            if patch.is_empty() {
                bail!("Nothing to update. Pass at least one field flag.");
            }

            board.update_party(id, &patch).await.context("Failed to update party")?;
            output::success(&format!("Updated party {id}"));
            Ok(())
        }
        PartiesSubcommand::Delete { id } => {
            let id = parse_id(&id, "party")?;
            board.delete_party(id).await.context("Failed to delete party")?;
            output::success(&format!("Disbanded party {id}"));
            Ok(())
        }
        PartiesSubcommand::Join { id } => {
            let id = parse_id(&id, "party")?;
            board.request_join(id).await.context("Failed to request to join")?;
            output::success(&format!("Requested to join party {id}"));
            Ok(())
        }
        PartiesSubcommand::Approve { id, user } => {
            let id = parse_id(&id, "party")?;
            let decision = JoinDecision::parse(&user).context("Invalid user id")?;
            board
                .approve_join(id, &decision)
                .await
                .context("Failed to approve join request")?;
            output::success(&format!("Approved {} for party {id}", decision.user_id));
            Ok(())
        }
        PartiesSubcommand::Reject { id, user } => {
            let id = parse_id(&id, "party")?;
            let decision = JoinDecision::parse(&user).context("Invalid user id")?;
            board
                .reject_join(id, &decision)
                .await
                .context("Failed to reject join request")?;
            output::success(&format!("Rejected {} for party {id}", decision.user_id));
            Ok(())
        }
        PartiesSubcommand::Leave { id } => {
            let id = parse_id(&id, "party")?;
            board.leave_party(id).await.context("Failed to leave party")?;
            output::success(&format!("Left party {id}"));
            Ok(())
        }
        PartiesSubcommand::RemoveMember { id, user } => {
            let id = parse_id(&id, "party")?;
            let user = parse_id(&user, "user")?;
            board
                .remove_member(id, user)
                .await
                .context("Failed to remove member")?;
            output::success(&format!("Removed {user} from party {id}"));
            Ok(())
        }
    }
}
