//! Logging setup.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies. Logs go
//! to stderr so the report on stdout stays machine readable.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global fmt subscriber.
pub fn init_logging(log_level: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
