use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `PARISH_LOG` (default `warn`).
pub fn init() {
    let filter = EnvFilter::try_from_env("PARISH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
