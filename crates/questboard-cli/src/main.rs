//! questboard - command-line front-end for the Quest Board API.
//!
//! A thin wrapper over `questboard-http`: every command validates its input
//! with the core schemas, calls the API through a [`QuestBoard`] and prints
//! the result.
//!
//! [`QuestBoard`]: questboard_http::QuestBoard

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{announcements, comments, contractors, login, logout, parties, quests, system, users, whoami};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Login(args) => login::run(args).await,
        Commands::Logout(args) => logout::run(args).await,
        Commands::Whoami(args) => whoami::run(args).await,
        Commands::Quests(cmd) => quests::handle(cmd).await,
        Commands::Comments(cmd) => comments::handle(cmd).await,
        Commands::Contractors(cmd) => contractors::handle(cmd).await,
        Commands::Parties(cmd) => parties::handle(cmd).await,
        Commands::Users(cmd) => users::handle(cmd).await,
        Commands::Announcements(cmd) => announcements::handle(cmd).await,
        Commands::System(cmd) => system::handle(cmd).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
