use clap::ArgMatches;
use tracing::info;

use docsgpt_core::{ConversationId, ConversationSummary, HttpStore, NavigationPanel, Transcript};

use super::helpers::{build_panel, format_count, report_error, runtime};
use crate::table::Table;

pub(crate) fn handle_conversations_command(
    root: &ArgMatches,
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = root.get_flag("json");
    let panel = build_panel(root)?;
    let rt = runtime()?;

    match matches.subcommand() {
        Some(("list", _)) => rt.block_on(list(&panel, json_output)),
        Some(("show", sub)) => rt.block_on(show(&panel, id_arg(sub)?, json_output)),
        Some(("rename", sub)) => {
            let name = sub
                .get_one::<String>("name")
                .ok_or("Name argument is required")?;
            rt.block_on(rename(&panel, id_arg(sub)?, name))
        }
        Some(("delete", sub)) => rt.block_on(delete(&panel, id_arg(sub)?)),
        _ => Err("Unknown conversations command".into()),
    }
}

fn id_arg(matches: &ArgMatches) -> Result<ConversationId, Box<dyn std::error::Error>> {
    let id = matches
        .get_one::<String>("id")
        .ok_or("Conversation id argument is required")?;
    Ok(ConversationId::new(id.as_str()))
}

async fn list(
    panel: &NavigationPanel<HttpStore>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.conversations.list_started", json_output = json_output);

    panel
        .load_conversations()
        .await
        .map_err(|e| report_error("cli.conversations.list_failed", e))?;

    let conversations: Vec<ConversationSummary> = panel.read(|s| {
        s.sessions()
            .conversations()
            .map(<[_]>::to_vec)
            .unwrap_or_default()
    });

    if json_output {
        println!("{}", serde_json::to_string_pretty(&conversations)?);
    } else if conversations.is_empty() {
        println!("No saved conversations.");
    } else {
        print!("{}", conversation_table(&conversations).render());
        println!(
            "{}",
            format_count(conversations.len(), "conversation", "conversations")
        );
    }

    info!(
        event = "cli.conversations.list_completed",
        count = conversations.len()
    );
    Ok(())
}

async fn show(
    panel: &NavigationPanel<HttpStore>,
    id: ConversationId,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.conversations.show_started", id = %id);

    panel
        .select_conversation(&id)
        .await
        .map_err(|e| report_error("cli.conversations.show_failed", e))?;

    let transcript = panel.read(|s| s.sessions().transcript().clone());
    if json_output {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
    } else {
        print!("{}", render_transcript(&transcript));
    }

    info!(event = "cli.conversations.show_completed", id = %id);
    Ok(())
}

async fn rename(
    panel: &NavigationPanel<HttpStore>,
    id: ConversationId,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.conversations.rename_started", id = %id);

    panel
        .rename_conversation(&id, name)
        .await
        .map_err(|e| report_error("cli.conversations.rename_failed", e))?;

    println!("Renamed conversation '{}' to '{}'.", id, name.trim());
    info!(event = "cli.conversations.rename_completed", id = %id);
    Ok(())
}

async fn delete(
    panel: &NavigationPanel<HttpStore>,
    id: ConversationId,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.conversations.delete_started", id = %id);

    panel
        .delete_conversation(&id)
        .await
        .map_err(|e| report_error("cli.conversations.delete_failed", e))?;

    let remaining = panel.read(|s| s.sessions().conversations().map_or(0, <[_]>::len));
    println!(
        "Deleted conversation '{}'. {} left.",
        id,
        format_count(remaining, "conversation", "conversations")
    );
    info!(event = "cli.conversations.delete_completed", id = %id);
    Ok(())
}

fn conversation_table(conversations: &[ConversationSummary]) -> Table {
    let mut table = Table::new(vec!["ID", "Name", "Updated"]);
    for conversation in conversations {
        table.push(vec![
            conversation.id.to_string(),
            conversation.name.clone(),
            conversation
                .last_updated
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table
}

fn render_transcript(transcript: &Transcript) -> String {
    if transcript.is_empty() {
        return "(empty conversation)\n".to_string();
    }

    let mut out = String::new();
    for exchange in &transcript.queries {
        out.push_str(&format!("> {}\n", exchange.prompt));
        match &exchange.response {
            Some(response) => out.push_str(&format!("{}\n", response)),
            None => out.push_str("(no response)\n"),
        }
        for source in &exchange.sources {
            out.push_str(&format!("  source: {}\n", source.title));
        }
        out.push('\n');
    }
    out
}
