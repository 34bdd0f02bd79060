use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Only this crate's events pass the target filter, so `--verbose` never
/// turns on debug output from `reqwest` or `hyper`.
const LOG_TARGET: &str = env!("CARGO_CRATE_NAME");

fn levels(verbose: bool) -> (LevelFilter, &'static str) {
    if verbose {
        (LevelFilter::DEBUG, "debug")
    } else {
        (LevelFilter::OFF, "off")
    }
}

fn app_filter(level_filter: LevelFilter) -> Targets {
    Targets::new().with_target(LOG_TARGET, level_filter)
}

/// Installs the global subscriber. `--verbose` enables cache hit/miss and
/// resolver debug events; `RUST_LOG` overrides the default level.
pub fn init_logging(verbose: bool) {
    let (level_filter, level) = levels(verbose);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time())
        .with(app_filter(level_filter))
        .with(env_filter)
        .init();
}
