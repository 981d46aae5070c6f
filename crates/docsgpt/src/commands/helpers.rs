use clap::ArgMatches;
use tracing::{error, warn};

use docsgpt_config::NavConfig;
use docsgpt_core::{DocsError, HttpStore, NavigationPanel, PanelOptions};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub fn load_config_with_warning() -> NavConfig {
    match NavConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.docsgpt/config.toml and ./.docsgpt/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            NavConfig::default()
        }
    }
}

/// Apply `--api-host` and `--embeddings`, which win over every other source.
pub fn apply_cli_overrides(mut config: NavConfig, matches: &ArgMatches) -> NavConfig {
    if let Some(host) = matches.get_one::<String>("api-host") {
        config.api.host = Some(host.clone());
    }
    if let Some(name) = matches.get_one::<String>("embeddings") {
        config.embeddings.name = Some(name.clone());
    }
    config
}

/// Resolve configuration and build a panel over the HTTP store.
pub fn build_panel(
    matches: &ArgMatches,
) -> Result<NavigationPanel<HttpStore>, Box<dyn std::error::Error>> {
    let config = apply_cli_overrides(load_config_with_warning(), matches);
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        error!(event = "cli.config.invalid", error = %e, code = e.error_code());
        return Err(e.into());
    }

    let store = HttpStore::from_config(&config).map_err(|e| {
        eprintln!("Could not create HTTP client: {}", e);
        error!(event = "cli.store.init_failed", error = %e, code = e.error_code());
        e
    })?;

    Ok(NavigationPanel::new(store, PanelOptions::from_config(&config)))
}

/// Single-threaded runtime for one command.
pub fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Print a failure and log it at a level matching its cause.
pub fn report_error<E: DocsError>(event: &'static str, e: E) -> Box<dyn std::error::Error> {
    eprintln!("Error: {}", e);
    if e.is_user_error() {
        warn!(event = event, error = %e, code = e.error_code());
    } else {
        error!(event = event, error = %e, code = e.error_code());
    }
    Box::new(e)
}

/// Format a count with singular/plural noun.
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0, "conversation", "conversations"), "0 conversations");
        assert_eq!(format_count(1, "conversation", "conversations"), "1 conversation");
        assert_eq!(format_count(3, "document", "documents"), "3 documents");
    }

    #[test]
    fn test_cli_overrides_win() {
        let matches = crate::app::build_cli()
            .try_get_matches_from(vec![
                "docsgpt",
                "--api-host",
                "http://localhost:7091",
                "--embeddings",
                "m1",
                "docs",
                "list",
            ])
            .unwrap();
        let mut base = NavConfig::default();
        base.api.host = Some("https://example.com".to_string());

        let config = apply_cli_overrides(base, &matches);
        assert_eq!(config.api.host(), "http://localhost:7091");
        assert_eq!(config.embeddings.name(), "m1");
    }

    #[test]
    fn test_cli_overrides_absent_keep_config() {
        let matches = crate::app::build_cli()
            .try_get_matches_from(vec!["docsgpt", "docs", "list"])
            .unwrap();
        let mut base = NavConfig::default();
        base.embeddings.name = Some("from-file".to_string());

        let config = apply_cli_overrides(base, &matches);
        assert_eq!(config.embeddings.name(), "from-file");
    }
}
