//! nashc boot property initializer
//!
//! Runs once at boot: reads total memory and writes the matching Dalvik
//! heap tuning properties. No re-evaluation afterwards.

mod dalvik;

use anyhow::{Context, Result};
use nashc_hal::SystemPropertyStore;
use tracing::{debug, info};

fn main() -> Result<()> {
    setup_logging();

    let total = dalvik::read_total_ram().context("Failed to read total memory")?;
    info!("Total memory: {} bytes", total);

    match dalvik::profile_for_total_ram(total) {
        Some(profile) => {
            let store = SystemPropertyStore::new();
            dalvik::apply(&store, profile).context("Failed to set heap properties")?;
            info!("Dalvik heap properties set");
        }
        None => {
            debug!("Under the 3 GiB tier, keeping platform heap defaults");
        }
    }

    Ok(())
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
