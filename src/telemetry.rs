//! Tracing initialization
//!
//! Events go to stderr so they never mix with command output. The filter comes
//! from `TROVE_LOG` (see [`crate::config`]).

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// An unparsable filter falls back to `warn`. Calling this twice is harmless;
/// the second subscriber is simply not installed.
pub fn init(filter: &str) {
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
