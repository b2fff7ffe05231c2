use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use crate::error::GameResult;
use crate::formatter::CustomFormatter;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` decides what gets through.
pub fn setup_logging(default_filter: &str) -> GameResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(true)
        .with_target(true)
        .event_format(CustomFormatter)
        .with_env_filter(filter)
        .finish()
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
