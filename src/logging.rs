use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Install a global `tracing` subscriber for the engine's log events
///
/// `RUST_LOG` takes precedence over the configured level. Formats: `pretty`,
/// `compact`, anything else uses the default full format. Fails if a global
/// subscriber is already set, which hosts embedding the engine may ignore.
pub fn init(settings: &LoggingSettings) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match settings.format.as_str() {
        "pretty" => subscriber.pretty().try_init(),
        "compact" => subscriber.compact().try_init(),
        _ => subscriber.try_init(),
    }
}
