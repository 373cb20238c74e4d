use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Sets up `tracing` output on stderr, filtered by `FORECAST_LOG`
/// (e.g. `FORECAST_LOG=ticket_forecast=info`). Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("FORECAST_LOG")
            .unwrap_or_else(|_| EnvFilter::new("ticket_forecast=warn"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
