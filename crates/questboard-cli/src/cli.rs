//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{
    announcements::AnnouncementsCommand, comments::CommentsCommand, contractors::ContractorsCommand,
    login::LoginArgs, logout::LogoutArgs, parties::PartiesCommand, quests::QuestsCommand, system::SystemCommand,
    users::UsersCommand, whoami::WhoamiArgs,
};

/// Quest Board administration tool.
#[derive(Parser, Debug)]
#[command(name = "questboard")]
#[command(author, version = env!("QUESTBOARD_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login(LoginArgs),

    /// Sign out and forget the stored session
    Logout(LogoutArgs),

    /// Display the signed-in user
    Whoami(WhoamiArgs),

    /// Quest operations
    Quests(QuestsCommand),

    /// Quest comment operations
    Comments(CommentsCommand),

    /// Quest contractor operations
    Contractors(ContractorsCommand),

    /// Party operations
    Parties(PartiesCommand),

    /// User administration
    Users(UsersCommand),

    /// Announcement operations
    Announcements(AnnouncementsCommand),

    /// Database maintenance
    System(SystemCommand),
}
