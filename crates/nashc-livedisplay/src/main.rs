//! nashc display color calibration service
//!
//! Registers the calibration object with the service registry and blocks
//! serving requests on a single-thread pool where the calling thread
//! joins. Exits with code 1 if registration fails or the serve loop ever
//! returns.

use anyhow::Result;
use nashc_hal::ServicePool;
use nashc_livedisplay::{CalibrationConfig, DisplayColorCalibration};
use std::sync::Arc;
use tracing::{error, info};

fn main() -> Result<()> {
    setup_logging();

    let dcc = Arc::new(DisplayColorCalibration::with_config(
        CalibrationConfig::load_default(),
    ));

    let mut pool = ServicePool::with_threads(1, true);
    if let Err(e) = pool.register(dcc) {
        error!("Cannot register display color calibration service: {}", e);
        std::process::exit(1);
    }

    info!("LiveDisplay service is ready");

    pool.join()?;

    error!("LiveDisplay service failed to join thread pool");
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
