//! Log output for the CLI.
//!
//! Logs go to stderr so that stdout carries nothing but IDs and decoded
//! fields. Verbosity follows `RUST_LOG` and defaults to `warn`, which still
//! surfaces wrapped shard IDs and corrupted timestamps.
//!
//! ```bash
//! RUST_LOG=snowcodec=trace snowcodec generate --count 3
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_line_number(true)
                .with_target(true)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339()),
        )
        .try_init()?;
    Ok(())
}
