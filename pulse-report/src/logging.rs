use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "pulse_report=info,pulse_pipeline=info";

/// Initialize tracing.
///
/// Events go to stderr so stdout carries only the report.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "pulse_report=debug,pulse_pipeline=debug"
    } else {
        DEFAULT_FILTER
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
