mod conversations;
mod docs;
mod global;


use clap::Command;

pub fn build_cli() -> Command {
    global::root_command()
        .subcommand(conversations::conversations_command())
        .subcommand(docs::docs_command())
}
