use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. RUST_LOG wins over `default_level`.
/// Logs go to stderr; stdout is for command output.
/// Safe to call more than once (later calls are no-ops).
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
