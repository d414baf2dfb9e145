//! Dalvik heap tuning
//!
//! Picks one of two hand-tuned heap profiles from total physical memory
//! and writes the six dalvik.vm heap properties. Devices under 3 GiB set
//! nothing and keep the platform defaults.

use nashc_hal::{HalError, PropertyStore};
use std::fs;
use std::path::Path;

const GIB: u64 = 1024 * 1024 * 1024;

/// One row of dalvik.vm heap tuning values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapProfile {
    pub start_size: &'static str,
    pub growth_limit: &'static str,
    pub size: &'static str,
    pub target_utilization: &'static str,
    pub min_free: &'static str,
    pub max_free: &'static str,
}

/// Values from phone-xhdpi-6144-dalvik-heap.mk
const HEAP_6GB: HeapProfile = HeapProfile {
    start_size: "16m",
    growth_limit: "256m",
    size: "512m",
    target_utilization: "0.5",
    min_free: "8m",
    max_free: "32m",
};

/// Values from phone-xhdpi-4096-dalvik-heap.mk
const HEAP_4GB: HeapProfile = HeapProfile {
    start_size: "8m",
    growth_limit: "192m",
    size: "512m",
    target_utilization: "0.6",
    min_free: "8m",
    max_free: "16m",
};

/// Pick the heap profile for a given total memory, in bytes. Below the
/// 3 GiB tier there is no profile and the platform defaults stand.
pub fn profile_for_total_ram(total_bytes: u64) -> Option<HeapProfile> {
    if total_bytes >= 5 * GIB {
        Some(HEAP_6GB)
    } else if total_bytes >= 3 * GIB {
        Some(HEAP_4GB)
    } else {
        None
    }
}

/// Write the six heap properties through the given store.
pub fn apply(store: &impl PropertyStore, profile: HeapProfile) -> Result<(), HalError> {
    store.set("dalvik.vm.heapstartsize", profile.start_size)?;
    store.set("dalvik.vm.heapgrowthlimit", profile.growth_limit)?;
    store.set("dalvik.vm.heapsize", profile.size)?;
    store.set("dalvik.vm.heaptargetutilization", profile.target_utilization)?;
    store.set("dalvik.vm.heapminfree", profile.min_free)?;
    store.set("dalvik.vm.heapmaxfree", profile.max_free)?;
    Ok(())
}

/// Read total physical memory, in bytes, from /proc/meminfo.
pub fn read_total_ram() -> Result<u64, HalError> {
    total_ram_from(Path::new("/proc/meminfo"))
}

fn total_ram_from(path: &Path) -> Result<u64, HalError> {
    let contents = fs::read_to_string(path)?;

    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            if let Some(kb) = rest.split_whitespace().next()
                && let Ok(kb) = kb.parse::<u64>()
            {
                return Ok(kb * 1024);
            }
        }
    }

    Err(HalError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        "MemTotal missing from meminfo",
    )))
}
