use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan, time::ChronoLocal}};

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber: `RUST_LOG` filter (default `info`) and
/// wall-clock `HH:MM:SS` timestamps.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(ChronoLocal::new("%H:%M:%S".to_string()))
        .with_span_events(span_events(&env_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Closing spans are logged, timing each pipeline step, whenever the
/// filter admits debug events.
fn span_events(filter: &EnvFilter) -> FmtSpan {
    match filter.max_level_hint() {
        Some(level) if level >= LevelFilter::DEBUG => FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_timing_follows_filter_level() {
        assert_eq!(span_events(&EnvFilter::new(DEFAULT_FILTER)), FmtSpan::NONE);
        assert_eq!(span_events(&EnvFilter::new("warn")), FmtSpan::NONE);
        assert_eq!(span_events(&EnvFilter::new("debug")), FmtSpan::CLOSE);
        assert_eq!(span_events(&EnvFilter::new("ratio_ph_rs=trace")), FmtSpan::CLOSE);
    }
}
