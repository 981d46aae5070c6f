use clap::{Arg, ArgAction, Command};

pub fn root_command() -> Command {
    Command::new("docsgpt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browse DocsGPT conversations and source documents")
        .long_about("Lists, inspects, renames, and deletes saved DocsGPT conversations, and manages the source documents available for retrieval. Settings come from ~/.docsgpt/config.toml, ./.docsgpt/config.toml, DOCSGPT_API_HOST and DOCSGPT_EMBEDDINGS_NAME, and the flags below.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("api-host")
                .long("api-host")
                .value_name("URL")
                .help("DocsGPT API base URL (overrides config)")
                .global(true),
        )
        .arg(
            Arg::new("embeddings")
                .long("embeddings")
                .value_name("MODEL")
                .help("Embedding model whose documents are selectable (overrides config)")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
}
