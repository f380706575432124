use tracing_subscriber::EnvFilter;

/// Filter used when `MARKETFEED_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "marketfeed=warn";

/// Install the global log subscriber. Logs go to stderr so command output
/// on stdout stays clean.
pub fn init() {
    let filter = EnvFilter::try_from_env("MARKETFEED_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A subscriber may already be installed (tests, embedding apps)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
