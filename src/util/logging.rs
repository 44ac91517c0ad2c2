//! Logging setup for the binary; verbosity comes from the `-d` count.

use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Crates whose events are never shown.
const NOISY_MODULES: [&str; 1] = ["rand"];

/// -d info, -dd debug, -ddd trace, warnings otherwise.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    }
}

/// Stderr subscriber filtered by verbosity and [`NOISY_MODULES`].
pub fn subscriber(verbosity: u8) -> impl Subscriber + Send + Sync + 'static {
    let module_filter = filter_fn(|metadata| {
        !NOISY_MODULES
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::ENTER)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer
        .with_filter(level_for(verbosity))
        .with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer)
}

/// Install the global subscriber.
pub fn setup_logging(verbosity: u8) {
    subscriber(verbosity).init();

    match level_for(verbosity.min(3)) {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    const TARGET: &str = "quadriclass::domain";

    #[test]
    fn given_no_debug_flag_when_logging_then_warnings_only() {
        tracing::subscriber::with_default(subscriber(0), || {
            assert!(tracing::enabled!(target: TARGET, Level::ERROR));
            assert!(tracing::enabled!(target: TARGET, Level::WARN));
            assert!(!tracing::enabled!(target: TARGET, Level::INFO));
        });
    }

    #[test]
    fn given_one_debug_flag_when_logging_then_info_shown() {
        tracing::subscriber::with_default(subscriber(1), || {
            assert!(tracing::enabled!(target: TARGET, Level::INFO));
            assert!(!tracing::enabled!(target: TARGET, Level::DEBUG));
        });
    }

    #[test]
    fn given_max_verbosity_when_logging_then_own_events_pass_and_rand_is_muted() {
        tracing::subscriber::with_default(subscriber(3), || {
            assert!(tracing::enabled!(target: "quadriclass::application", Level::TRACE));
            assert!(!tracing::enabled!(target: "rand::rngs", Level::ERROR));
        });
    }

    #[test]
    fn given_excess_verbosity_when_mapping_then_trace() {
        assert_eq!(level_for(2), LevelFilter::DEBUG);
        assert_eq!(level_for(7), LevelFilter::TRACE);
    }
}
