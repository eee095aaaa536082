use anyhow::Context;
use tracing::debug;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::models::logging::LoggingConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.filter`. Returns `Ok(false)` when
/// a subscriber was already installed; an invalid filter directive is an
/// error.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<bool> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .with_context(|| {
            format!("invalid log filter directive `{}`", config.filter)
        })?;

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(config.ansi))
        .try_init()
    {
        debug!(error = %err, "Tracing subscriber already installed");
        return Ok(false);
    }
    Ok(true)
}
