use clap::{Arg, Command};

pub fn docs_command() -> Command {
    Command::new("docs")
        .about("Manage source documents")
        .subcommand_required(true)
        .subcommand(
            Command::new("list").about("List source documents and whether they are selectable"),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a locally uploaded document")
                .arg(
                    Arg::new("name")
                        .help("Document name")
                        .index(1)
                        .required(true),
                ),
        )
}
