use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence when set. Otherwise the level is `debug` when
/// `verbose` is set and `warn` by default, so results on stdout stay clean.
pub fn init_subscriber(verbose: bool) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    };

    // A second initialisation (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .try_init();
}
