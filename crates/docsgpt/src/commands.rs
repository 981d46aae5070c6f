use clap::ArgMatches;
use tracing::{error, info};

mod conversations;
mod docs;
mod helpers;

use conversations::handle_conversations_command;
use docs::handle_docs_command;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        event = "cli.startup",
        version = env!("CARGO_PKG_VERSION")
    );

    match matches.subcommand() {
        Some(("conversations", sub_matches)) => handle_conversations_command(matches, sub_matches),
        Some(("docs", sub_matches)) => handle_docs_command(matches, sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
