use clap::{Arg, Command};

pub fn conversations_command() -> Command {
    Command::new("conversations")
        .visible_alias("conv")
        .about("Manage saved conversations")
        .subcommand_required(true)
        .subcommand(Command::new("list").about("List saved conversations"))
        .subcommand(
            Command::new("show")
                .about("Print the transcript of a conversation")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("rename")
                .about("Rename a conversation")
                .arg(id_arg())
                .arg(
                    Arg::new("name")
                        .help("New conversation name")
                        .index(2)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a conversation")
                .arg(id_arg()),
        )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .help("Conversation id")
        .index(1)
        .required(true)
}
