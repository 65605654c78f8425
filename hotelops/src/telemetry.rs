//! Tracing initialization.
//!
//! Log output goes to stderr so that the JSON printed by the CLI on stdout stays machine
//! readable. Verbosity is controlled with the standard `RUST_LOG` variable and defaults to
//! `info`, e.g. `RUST_LOG=hotelops=debug` to see every record request.

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize the global tracing subscriber with an env filter and a console fmt layer
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    info!("Telemetry initialized");
    Ok(())
}
