use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Log lines go to stderr so stdout stays
/// reserved for command output. `RUST_LOG` overrides the default level.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "debug,apod_archive=debug"
    } else {
        "info,reqwest=warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // Ignore the error when a subscriber is already set (tests, embedding)
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok();
}
