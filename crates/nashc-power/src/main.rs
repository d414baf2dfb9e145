//! nashc power HAL service
//!
//! Binds `libpowerhal.so`, publishes the power implementation object,
//! and serves forever. A missing vendor library or symbol means a broken
//! device image, so startup aborts instead of degrading.

use anyhow::Result;
use nashc_hal::ServicePool;
use nashc_power::{Power, PowerConfig, PowerHalLib};
use std::sync::Arc;
use tracing::{error, info};

fn main() -> Result<()> {
    setup_logging();

    let config = PowerConfig::load_default();

    let vendor = match PowerHalLib::load_from(&config.vendor_lib) {
        Ok(vendor) => vendor,
        Err(e) => {
            error!("{}", e);
            std::process::abort();
        }
    };

    let power = Arc::new(Power::with_config(vendor, &config));

    let mut pool = ServicePool::with_threads(1, true);
    pool.register(power)?;

    info!("Power HAL service is ready");

    pool.join()?;

    error!("Power HAL serve loop returned");
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
