//! Display color calibration for nashc
//!
//! Exposes the panel's RGB calibration through a single kernel node that
//! takes a space-separated "r g b" triple.

use nashc_hal::service::HalService;
use nashc_hal::{HalError, sysfs};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Service name the calibration HAL is published under.
pub const SERVICE_NAME: &str = "vendor.lineage.livedisplay.IDisplayColorCalibration/default";

/// Lower bound for each RGB component.
pub const COLOR_MIN: i32 = 0;
/// Upper bound for each RGB component.
pub const COLOR_MAX: i32 = 255;

/// Calibration node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    pub rgb_node: PathBuf,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            rgb_node: PathBuf::from("/sys/class/graphics/fb0/rgb"),
        }
    }
}

impl CalibrationConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, HalError> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| HalError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from the system location, falling back to defaults.
    pub fn load_default() -> Self {
        let path = Path::new("/etc/nashc/livedisplay.toml");
        if path.exists() {
            match Self::load(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring bad livedisplay config: {}", e),
            }
        }
        Self::default()
    }
}

/// The display color calibration implementation object.
pub struct DisplayColorCalibration {
    config: CalibrationConfig,
    rgb: Mutex<[i32; 3]>,
}

impl DisplayColorCalibration {
    pub fn new() -> Self {
        Self::with_config(CalibrationConfig::default())
    }

    pub fn with_config(config: CalibrationConfig) -> Self {
        Self {
            config,
            rgb: Mutex::new([COLOR_MAX; 3]),
        }
    }

    pub fn max_value(&self) -> i32 {
        COLOR_MAX
    }

    pub fn min_value(&self) -> i32 {
        COLOR_MIN
    }

    /// Last calibration applied through this object.
    pub fn calibration(&self) -> [i32; 3] {
        *self.rgb.lock().unwrap()
    }

    /// Apply an RGB calibration triple to the panel.
    pub fn set_calibration(&self, rgb: [i32; 3]) -> Result<(), HalError> {
        if rgb
            .iter()
            .any(|c| !(COLOR_MIN..=COLOR_MAX).contains(c))
        {
            return Err(HalError::Unsupported("calibration value out of range"));
        }

        let line = format!("{} {} {}", rgb[0], rgb[1], rgb[2]);
        sysfs::write_str_node(&self.config.rgb_node, &line)?;

        *self.rgb.lock().unwrap() = rgb;
        tracing::debug!("Panel calibration set to {}", line);
        Ok(())
    }
}

impl Default for DisplayColorCalibration {
    fn default() -> Self {
        Self::new()
    }
}

impl HalService for DisplayColorCalibration {
    fn descriptor(&self) -> &str {
        SERVICE_NAME
    }
}
