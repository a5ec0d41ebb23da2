//! User administration commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use questboard_core::ListFormat;
use questboard_core::page::MAX_PAGE_SIZE;
use questboard_core::schema::{BulkUserIds, UserDraft};

use super::ListArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersSubcommand {
    /// List one page of users
    List {
        /// Decode the older `{users, totalCount}` list format
        #[arg(long)]
        legacy: bool,

        #[command(flatten)]
        list: ListArgs,
    },

    /// List every user as an id and display name
    All {
        /// Users fetched per request
        #[arg(long, default_value_t = MAX_PAGE_SIZE)]
        page_size: u32,

        /// Decode the older `{users, totalCount}` list format
        #[arg(long)]
        legacy: bool,
    },

    /// Register a user
    Create {
        /// Login id
        #[arg(long)]
        login_id: String,

        /// Initial password
        #[arg(long, env = "QUESTBOARD_NEW_PASSWORD", hide_env_values = true)]
        password: String,

        /// Email address
        #[arg(long)]
        email: String,
    },

    /// Enable user accounts
    Enable(BulkArgs),

    /// Disable user accounts
    Disable(BulkArgs),

    /// Delete user accounts
    Delete(BulkArgs),
}

#[derive(Args, Debug)]
pub struct BulkArgs {
    /// User ids
    #[arg(required = true)]
    pub ids: Vec<String>,
}

impl BulkArgs {
    fn parse(&self) -> Result<BulkUserIds> {
        BulkUserIds::parse(&self.ids).context("Invalid user ids")
    }
}

fn format(legacy: bool) -> ListFormat {
    if legacy { ListFormat::LegacyUsers } else { ListFormat::Current }
}

pub async fn handle(cmd: UsersCommand) -> Result<()> {
    match cmd.command {
        UsersSubcommand::List { legacy, list } => {
            let board = session::connect_with_format(format(legacy))?;
            let page = board.users(list.page()?).await.context("Failed to list users")?;
            output::page(&page, list.pretty)
        }
        UsersSubcommand::All { page_size, legacy } => {
            let board = session::connect_with_format(format(legacy))?;
            let users = board.all_users(page_size).await.context("Failed to fetch users")?;
            for user in &users {
                println!("{}\t{}", user.id, user.name);
            }
            eprintln!("{} users", users.len());
            Ok(())
        }
        UsersSubcommand::Create {
            login_id,
            password,
            email,
        } => {
            let user = UserDraft {
                login_id: login_id.into(),
                password: password.into(),
                email: email.into(),
            }
            .validate_create()
            .context("Invalid user")?;

            let board = session::connect()?;
            board.create_user(&user).await.context("Failed to create user")?;
            output::success(&format!("Registered {}", user.login_id));
            Ok(())
        }
        UsersSubcommand::Enable(args) => {
            let ids = args.parse()?;
            let board = session::connect()?;
            board.enable_users(&ids).await.context("Failed to enable users")?;
            output::success(&format!("Enabled {} users", ids.ids.len()));
            Ok(())
        }
        UsersSubcommand::Disable(args) => {
            let ids = args.parse()?;
            let board = session::connect()?;
            board.disable_users(&ids).await.context("Failed to disable users")?;
            output::success(&format!("Disabled {} users", ids.ids.len()));
            Ok(())
        }
        UsersSubcommand::Delete(args) => {
            let ids = args.parse()?;
            let board = session::connect()?;
            board.delete_users(&ids).await.context("Failed to delete users")?;
            output::success(&format!("Deleted {} users", ids.ids.len()));
            Ok(())
        }
    }
}
