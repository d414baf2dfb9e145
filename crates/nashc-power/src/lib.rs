//! Power HAL shim for nashc
//!
//! Translates the fixed power HAL mode/boost surface into touchpanel
//! sysfs writes, vendor hint locks, and local state changes. The vendor
//! side lives in `libpowerhal.so`, bound once at startup; the dispatcher
//! runs against anything implementing [`VendorHints`] so tests can use a
//! recording fake.

pub mod mock;
pub mod power;
pub mod vendor;

pub use power::{Boost, Mode, Power, PowerConfig};
pub use vendor::{PowerHalLib, VendorError, VendorHints};
