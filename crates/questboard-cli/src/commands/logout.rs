//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::{self, storage};

#[derive(Args, Debug)]
pub struct LogoutArgs {
    /// Only forget the local session; do not contact the server
    #[arg(long)]
    pub local: bool,
}

pub async fn run(args: LogoutArgs) -> Result<()> {
    if !args.local {
        match session::connect() {
            Ok(board) => {
                if let Err(e) = board.sign_out().await {
                    tracing::warn!(error = %e, "server sign-out failed, clearing local session anyway");
                }
            }
            Err(e) => tracing::debug!(error = %e, "no session to sign out of"),
        }
    }

    if storage::clear_session().context("Failed to clear session")? {
        output::success("Signed out");
    } else {
        output::success("No active session");
    }
    Ok(())
}
