//! Power mode and boost dispatch
//!
//! Maps each mode/boost request to one of: a touchpanel sysfs write, a
//! vendor hint lock call, or a local flag change. Requests always come
//! back as success to the caller; the only typed rejections are the
//! hint-session operations, which this device does not implement.

use crate::vendor::VendorHints;
use nashc_hal::service::HalService;
use nashc_hal::{HalError, sysfs};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Service name the power HAL is published under.
pub const SERVICE_NAME: &str = "android.hardware.power.IPower/default";

/// Priority class used for the launch boost hint lock.
const LAUNCH_HINT: i32 = 11;
/// Duration of a launch boost, in milliseconds.
const LAUNCH_DURATION_MS: i32 = 30_000;
/// Substitute for interaction boosts requested with a duration under 1,
/// which would otherwise run indefinitely.
const INTERACTION_DEFAULT_MS: i32 = 80;

/// Power HAL modes, numbered per the platform contract.
///
/// The set is closed: every value in the contiguous range decodes, and
/// variants without a dispatch branch are recognized but inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Mode {
    DoubleTapToWake = 0,
    LowPower = 1,
    SustainedPerformance = 2,
    FixedPerformance = 3,
    Vr = 4,
    Launch = 5,
    ExpensiveRendering = 6,
    Interactive = 7,
    DeviceIdle = 8,
    DisplayInactive = 9,
    AudioStreamingLowLatency = 10,
    CameraStreamingSecure = 11,
    CameraStreamingLow = 12,
    CameraStreamingMid = 13,
    CameraStreamingHigh = 14,
}

impl Mode {
    const MIN: i32 = Mode::DoubleTapToWake as i32;
    const MAX: i32 = Mode::CameraStreamingHigh as i32;

    /// Decode a raw mode value.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Mode::DoubleTapToWake),
            1 => Some(Mode::LowPower),
            2 => Some(Mode::SustainedPerformance),
            3 => Some(Mode::FixedPerformance),
            4 => Some(Mode::Vr),
            5 => Some(Mode::Launch),
            6 => Some(Mode::ExpensiveRendering),
            7 => Some(Mode::Interactive),
            8 => Some(Mode::DeviceIdle),
            9 => Some(Mode::DisplayInactive),
            10 => Some(Mode::AudioStreamingLowLatency),
            11 => Some(Mode::CameraStreamingSecure),
            12 => Some(Mode::CameraStreamingLow),
            13 => Some(Mode::CameraStreamingMid),
            14 => Some(Mode::CameraStreamingHigh),
            _ => None,
        }
    }

    /// Whether a raw value falls in the span of defined modes.
    ///
    /// This is a range check from the lowest to the highest constant, not
    /// a check against the dispatch table: modes without a branch in
    /// `set_mode` still report supported and then do nothing when set.
    pub fn is_supported(raw: i32) -> bool {
        (Mode::MIN..=Mode::MAX).contains(&raw)
    }
}

/// Power HAL boosts, numbered per the platform contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Boost {
    Interaction = 0,
    DisplayUpdateImminent = 1,
    MlAcc = 2,
    AudioLaunch = 3,
    CameraLaunch = 4,
    CameraShot = 5,
}

impl Boost {
    const MIN: i32 = Boost::Interaction as i32;
    const MAX: i32 = Boost::CameraShot as i32;

    /// Decode a raw boost value.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Boost::Interaction),
            1 => Some(Boost::DisplayUpdateImminent),
            2 => Some(Boost::MlAcc),
            3 => Some(Boost::AudioLaunch),
            4 => Some(Boost::CameraLaunch),
            5 => Some(Boost::CameraShot),
            _ => None,
        }
    }

    /// Same contiguous-range policy as [`Mode::is_supported`].
    pub fn is_supported(raw: i32) -> bool {
        (Boost::MIN..=Boost::MAX).contains(&raw)
    }
}

/// Power HAL configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerConfig {
    pub vendor_lib: String,
    pub double_tap_node: PathBuf,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            vendor_lib: crate::vendor::POWERHAL_LIB.to_string(),
            double_tap_node: PathBuf::from("/proc/touchpanel/double_tap_enable"),
        }
    }
}

impl PowerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, HalError> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| HalError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from the system location, falling back to defaults.
    pub fn load_default() -> Self {
        let path = Path::new("/etc/nashc/power.toml");
        if path.exists() {
            match Self::load(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring bad power config: {}", e),
            }
        }
        Self::default()
    }
}

/// Dispatcher state mutated by mode/boost requests.
///
/// `handle` is the single outstanding launch boost lock; 0 means no lock
/// held. `low_power` gates whether boosts are honored at all.
#[derive(Debug, Default)]
struct HintState {
    handle: i32,
    low_power: bool,
}

/// The power HAL implementation object.
///
/// The two mutable fields sit behind a mutex so dispatch stays correct
/// even if the hosting pool routes requests from more than one thread.
pub struct Power<V> {
    vendor: V,
    double_tap_node: PathBuf,
    state: Mutex<HintState>,
}

impl<V: VendorHints> Power<V> {
    pub fn new(vendor: V) -> Self {
        Self::with_config(vendor, &PowerConfig::default())
    }

    pub fn with_config(vendor: V, config: &PowerConfig) -> Self {
        Self {
            vendor,
            double_tap_node: config.double_tap_node.clone(),
            state: Mutex::new(HintState::default()),
        }
    }

    /// Apply a mode change. Always reports success; the only internally
    /// fallible branch (the double-tap node write) is logged and
    /// swallowed.
    pub fn set_mode(&self, mode: Mode, enabled: bool) -> Result<(), HalError> {
        tracing::debug!("setMode {:?} to {}", mode, enabled);

        match mode {
            Mode::DoubleTapToWake => {
                // Node writer logs the failure; the caller still sees Ok.
                let _ = sysfs::write_str_node(&self.double_tap_node, if enabled { "1" } else { "0" });
            }
            Mode::Launch => {
                let mut state = self.state.lock().unwrap();
                if state.low_power {
                    return Ok(());
                }

                if state.handle != 0 {
                    self.vendor.lock_rel(state.handle);
                    state.handle = 0;
                }

                if enabled {
                    state.handle =
                        self.vendor
                            .lock_hint(LAUNCH_HINT, LAUNCH_DURATION_MS, process_id());
                }
            }
            Mode::Interactive => {
                if enabled {
                    // Device back in interactive state, restore all
                    // currently held hints.
                    self.vendor.scn_restore_all();
                } else {
                    // Device entering non-interactive state, disable all
                    // hints to save power.
                    self.vendor.scn_disable_all();
                }
            }
            Mode::LowPower => {
                self.state.lock().unwrap().low_power = enabled;
            }
            _ => {}
        }

        Ok(())
    }

    /// Report mode support by contiguous range check.
    pub fn is_mode_supported(&self, raw: i32) -> bool {
        tracing::debug!("isModeSupported {}", raw);
        Mode::is_supported(raw)
    }

    /// Forward a boost to the vendor library, fire and forget.
    ///
    /// The returned handle is deliberately discarded: hint expiry is
    /// owned by the vendor library, and only the launch mode tracks and
    /// releases its own lock.
    pub fn set_boost(&self, boost: Boost, duration_ms: i32) -> Result<(), HalError> {
        if self.state.lock().unwrap().low_power {
            tracing::info!("Will not perform boosts in low power");
            return Ok(());
        }

        let mut duration_ms = duration_ms;
        if boost == Boost::Interaction && duration_ms < 1 {
            duration_ms = INTERACTION_DEFAULT_MS;
        }

        tracing::debug!("setBoost {:?}, duration: {}", boost, duration_ms);

        let _ = self.vendor.lock_hint(boost as i32, duration_ms, process_id());
        Ok(())
    }

    /// Report boost support by contiguous range check.
    pub fn is_boost_supported(&self, raw: i32) -> bool {
        tracing::debug!("isBoostSupported {}", raw);
        Boost::is_supported(raw)
    }

    /// Adaptive hint sessions are not implemented on this device.
    pub fn create_hint_session(
        &self,
        _tgid: i32,
        _uid: i32,
        _thread_ids: &[i32],
        _duration_ns: i64,
    ) -> Result<(), HalError> {
        Err(HalError::Unsupported("hint sessions"))
    }

    /// Adaptive hint sessions are not implemented on this device.
    pub fn hint_session_preferred_rate(&self) -> Result<i64, HalError> {
        Err(HalError::Unsupported("hint sessions"))
    }
}

impl<V: VendorHints + Send + Sync> HalService for Power<V> {
    fn descriptor(&self) -> &str {
        SERVICE_NAME
    }
}

fn process_id() -> libc::pid_t {
    nix::unistd::getpid().as_raw()
}
