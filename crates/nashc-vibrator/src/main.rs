//! nashc vibrator HAL service

use anyhow::Result;
use nashc_hal::ServicePool;
use nashc_vibrator::{Vibrator, VibratorConfig};
use std::sync::Arc;
use tracing::{error, info};

fn main() -> Result<()> {
    setup_logging();

    let vibrator = Arc::new(Vibrator::with_config(VibratorConfig::load_default()));

    let mut pool = ServicePool::with_threads(1, true);
    pool.register(vibrator)?;

    info!("Vibrator HAL service is ready");

    pool.join()?;

    error!("Vibrator HAL serve loop returned");
    std::process::exit(1)
}

/// Setup logging to the system log collector
fn setup_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_ansi(false))
        .init();
}
