//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the session user as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs) -> Result<()> {
    let board = session::connect()?;
    let user = board.session().await.context("Failed to fetch session")?;

    if args.json {
        return output::json(&user);
    }

    output::field("User", &user.id.to_string());
    if let Some(login_id) = &user.login_id {
        output::field("Login ID", login_id);
    }
    if let Some(nickname) = &user.nickname {
        output::field("Nickname", nickname);
    }
    if let Some(rank) = user.rank {
        output::field("Rank", &rank.to_string());
    }
    output::field("Guild staff", if user.guild_staff { "yes" } else { "no" });
    output::field("URL", board.client().base_url().as_str());

    Ok(())
}
