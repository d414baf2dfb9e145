//! Vibrator HAL shim for nashc
//!
//! Drives the vibrator through three kernel control nodes: a state flag,
//! a duration, and an activate trigger. The driver interprets the write
//! sequence as configure-then-trigger, so activation order is fixed.

use nashc_hal::service::HalService;
use nashc_hal::{HalError, sysfs};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Service name the vibrator HAL is published under.
pub const SERVICE_NAME: &str = "android.hardware.vibrator.IVibrator/default";

/// Vibrator node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VibratorConfig {
    pub state_node: PathBuf,
    pub duration_node: PathBuf,
    pub activate_node: PathBuf,
}

impl Default for VibratorConfig {
    fn default() -> Self {
        Self {
            state_node: PathBuf::from("/sys/class/leds/vibrator/state"),
            duration_node: PathBuf::from("/sys/class/leds/vibrator/duration"),
            activate_node: PathBuf::from("/sys/class/leds/vibrator/activate"),
        }
    }
}

impl VibratorConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, HalError> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| HalError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from the system location, falling back to defaults.
    pub fn load_default() -> Self {
        let path = Path::new("/etc/nashc/vibrator.toml");
        if path.exists() {
            match Self::load(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring bad vibrator config: {}", e),
            }
        }
        Self::default()
    }
}

/// The vibrator HAL implementation object.
pub struct Vibrator {
    config: VibratorConfig,
}

impl Vibrator {
    pub fn new() -> Self {
        Self::with_config(VibratorConfig::default())
    }

    pub fn with_config(config: VibratorConfig) -> Self {
        Self { config }
    }

    /// Write an integer to a vibrator control node. An unopenable node
    /// comes back as a service-specific error, already logged with the
    /// value and path.
    pub fn set_node(&self, path: &Path, value: i64) -> Result<(), HalError> {
        sysfs::write_node(path, value)
    }

    /// Vibrate for `timeout_ms` milliseconds.
    ///
    /// Writes state=1, then the duration, then activate=1, in that exact
    /// order, stopping at the first failure. A timeout under 1 means
    /// turn the vibrator off.
    pub fn activate(&self, timeout_ms: i32) -> Result<(), HalError> {
        if timeout_ms < 1 {
            return self.off();
        }

        self.set_node(&self.config.state_node, 1)?;
        self.set_node(&self.config.duration_node, i64::from(timeout_ms))?;
        self.set_node(&self.config.activate_node, 1)?;

        Ok(())
    }

    /// Stop any running vibration.
    pub fn off(&self) -> Result<(), HalError> {
        self.set_node(&self.config.activate_node, 0)
    }

    /// Node configuration in use.
    pub fn config(&self) -> &VibratorConfig {
        &self.config
    }
}

impl Default for Vibrator {
    fn default() -> Self {
        Self::new()
    }
}

impl HalService for Vibrator {
    fn descriptor(&self) -> &str {
        SERVICE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vibrator_config_default() {
        let config = VibratorConfig::default();
        assert_eq!(
            config.state_node,
            PathBuf::from("/sys/class/leds/vibrator/state")
        );
        assert_eq!(
            config.activate_node,
            PathBuf::from("/sys/class/leds/vibrator/activate")
        );
    }

    #[test]
    fn test_vibrator_config_toml_round_trip() {
        let config = VibratorConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: VibratorConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.duration_node, config.duration_node);
    }
}
