//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`gtfs`], [`realtime`], or [`validate`]. Each
//! handler lives in its own submodule.

pub mod gtfs;
pub mod realtime;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::FeedCheckError;

pub async fn dispatch(cli: Cli) -> Result<(), FeedCheckError> {
    match cli.command {
        Some(Commands::Gtfs(args)) => gtfs::execute(args).await,
        Some(Commands::Realtime(args)) => realtime::execute(args).await,
        Some(Commands::Validate(ref args)) => validate::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  feedcheck v{version} \u{2014} transit feed source health checker\n\n  \
         No command provided. To get started:\n\n    \
         feedcheck gtfs                    Check static feeds from ./dataset.json\n    \
         feedcheck realtime                Check realtime updaters from ./realtime.json\n    \
         feedcheck validate gtfs           Structure-only check, no network\n    \
         feedcheck --help                  See all commands and options\n"
    );
}
