use tracing_subscriber::EnvFilter;

/// Initialise logging. The level is `info` unless debug logging is enabled
/// in the config file, in which case it is `debug` and `RUST_LOG` may
/// override it.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        // Ignore RUST_LOG so a stray environment variable cannot turn on
        // per-window style dumps.
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
