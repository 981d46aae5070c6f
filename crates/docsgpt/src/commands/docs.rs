use clap::ArgMatches;
use serde::Serialize;
use tracing::{info, warn};

use docsgpt_core::{DocumentDescriptor, HttpStore, NavigationPanel};

use super::helpers::{build_panel, format_count, report_error, runtime};
use crate::table::Table;

/// JSON row for `docs list`.
#[derive(Serialize)]
struct DocumentRow<'a> {
    #[serde(flatten)]
    document: &'a DocumentDescriptor,
    eligible: bool,
    selected: bool,
}

pub(crate) fn handle_docs_command(
    root: &ArgMatches,
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = root.get_flag("json");
    let panel = build_panel(root)?;
    let rt = runtime()?;

    match matches.subcommand() {
        Some(("list", _)) => rt.block_on(list(&panel, json_output)),
        Some(("delete", sub)) => {
            let name = sub
                .get_one::<String>("name")
                .ok_or("Name argument is required")?;
            rt.block_on(delete(&panel, name))
        }
        _ => Err("Unknown docs command".into()),
    }
}

async fn list(
    panel: &NavigationPanel<HttpStore>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.docs.list_started", json_output = json_output);

    panel
        .load_documents()
        .await
        .map_err(|e| report_error("cli.docs.list_failed", e))?;

    let (documents, model, selected) = panel.read(|s| {
        let docs = s.documents();
        (
            docs.documents().map(<[_]>::to_vec).unwrap_or_default(),
            docs.embeddings_model().to_string(),
            docs.selected().cloned(),
        )
    });

    let rows: Vec<DocumentRow<'_>> = documents
        .iter()
        .map(|document| DocumentRow {
            document,
            eligible: document.is_eligible_for(&model),
            selected: selected.as_ref() == Some(document),
        })
        .collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.iter().all(|r| !r.eligible) {
        // matches the dropdown's empty state
        println!("No default documentation for embedding model '{}'.", model);
        if !rows.is_empty() {
            print!("{}", document_table(&rows).render());
        }
    } else {
        print!("{}", document_table(&rows).render());
        let eligible = rows.iter().filter(|r| r.eligible).count();
        println!(
            "{} ({} selectable with '{}')",
            format_count(rows.len(), "document", "documents"),
            eligible,
            model
        );
    }

    info!(event = "cli.docs.list_completed", count = rows.len());
    Ok(())
}

async fn delete(
    panel: &NavigationPanel<HttpStore>,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.docs.delete_started", name = name);

    panel
        .load_documents()
        .await
        .map_err(|e| report_error("cli.docs.delete_failed", e))?;

    let document = panel.read(|s| {
        s.documents()
            .documents()
            .unwrap_or_default()
            .iter()
            .find(|d| d.name == name)
            .cloned()
    });
    let Some(document) = document else {
        eprintln!("Document '{}' not found.", name);
        warn!(event = "cli.docs.delete_unknown", name = name);
        return Err(format!("Document '{}' not found", name).into());
    };

    panel
        .delete_document(&document)
        .await
        .map_err(|e| report_error("cli.docs.delete_failed", e))?;

    println!("Deleted document '{}'.", document.label());
    info!(event = "cli.docs.delete_completed", name = name);
    Ok(())
}

fn document_table(rows: &[DocumentRow<'_>]) -> Table {
    let mut table = Table::new(vec!["", "Name", "Version", "Location", "Model"]);
    for row in rows {
        let marker = match (row.selected, row.eligible) {
            (true, _) => "*",
            (false, true) => "+",
            (false, false) => " ",
        };
        table.push(vec![
            marker.to_string(),
            row.document.name.clone(),
            row.document.version.clone(),
            row.document.location.to_string(),
            row.document.model.clone(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsgpt_core::DocumentLocation;

    fn descriptor(name: &str, model: &str) -> DocumentDescriptor {
        DocumentDescriptor {
            name: name.to_string(),
            version: "1".to_string(),
            model: model.to_string(),
            location: DocumentLocation::Local,
        }
    }

    #[test]
    fn test_document_row_json_is_flat() {
        let document = descriptor("Docs", "m1");
        let row = DocumentRow {
            document: &document,
            eligible: true,
            selected: false,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["name"], "Docs");
        assert_eq!(value["location"], "local");
        assert_eq!(value["eligible"], true);
        assert_eq!(value["selected"], false);
    }

    #[test]
    fn test_document_table_markers() {
        let docs = [descriptor("A", "m1"), descriptor("B", "m2")];
        let rows = vec![
            DocumentRow {
                document: &docs[0],
                eligible: true,
                selected: true,
            },
            DocumentRow {
                document: &docs[1],
                eligible: false,
                selected: false,
            },
        ];
        let rendered = document_table(&rows).render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[1].starts_with("*  A"));
        assert!(lines[2].starts_with("   B"));
    }
}
