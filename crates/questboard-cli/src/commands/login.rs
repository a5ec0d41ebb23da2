//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use questboard_core::BaseUrl;
use questboard_http::ClientConfig;

use crate::output;
use crate::session::{self, StoredSession, storage};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Login id to authenticate with
    #[arg(long)]
    pub login_id: String,

    /// Account password
    #[arg(long, env = "QUESTBOARD_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Quest Board URL, including its mount prefix
    #[arg(long, env = "QUESTBOARD_URL", default_value = "http://localhost:3000/quest-board")]
    pub url: String,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let base_url = BaseUrl::new(&args.url).context("Invalid Quest Board URL")?;
    let board = session::board(ClientConfig::new(base_url))?;

    eprintln!("{}", "Signing in...".dimmed());

    let user = board
        .sign_in(&args.login_id, &args.password)
        .await
        .context("Failed to sign in")?;

    let stored = StoredSession::capture(board.client());
    if stored.cookies.is_none() {
        tracing::warn!("server did not set a session cookie");
    }
    storage::save_session(&stored).context("Failed to save session")?;

    output::success("Signed in successfully");
    println!();
    output::field("User", &user.id.to_string());
    if let Some(login_id) = &user.login_id {
        output::field("Login ID", login_id);
    }
    output::field("URL", stored.base_url.as_str());

    Ok(())
}
