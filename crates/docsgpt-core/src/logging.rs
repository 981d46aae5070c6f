use tracing_subscriber::EnvFilter;

/// Install the JSON log subscriber on stderr.
///
/// `RUST_LOG` takes precedence; otherwise the level is `info`, or `error`
/// when `quiet` is set. Safe to call more than once.
pub fn init_logging(quiet: bool) {
    let default_directive = if quiet { "error" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let result = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if result.is_err() {
        tracing::debug!(event = "core.logging.already_initialized");
    }
}
