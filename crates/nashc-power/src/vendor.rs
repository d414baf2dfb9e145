//! Vendor performance library binding
//!
//! Resolves the fixed `libpowerhal.so` entry points once at startup and
//! holds them, strongly typed, for the process lifetime. A missing
//! library or symbol means a broken device image, not a transient
//! condition; the service binary aborts rather than degrading. There is
//! no reload and no version negotiation.

use libloading::Library;
use libloading::os::unix::Symbol;
use std::ffi::c_int;
use thiserror::Error;

/// Fixed name the vendor library is loaded under.
pub const POWERHAL_LIB: &str = "libpowerhal.so";

const SYM_INIT: &str = "libpowerhal_Init";
const SYM_CUS_LOCK_HINT: &str = "libpowerhal_CusLockHint";
const SYM_LOCK_REL: &str = "libpowerhal_LockRel";
const SYM_USER_SCN_DISABLE_ALL: &str = "libpowerhal_UserScnDisableAll";
const SYM_USER_SCN_RESTORE_ALL: &str = "libpowerhal_UserScnRestoreAll";

#[derive(Debug, Error)]
pub enum VendorError {
    #[error("Could not load {name}: {source}")]
    Library {
        name: String,
        source: libloading::Error,
    },

    #[error("Could not locate symbol {name}: {source}")]
    Symbol {
        name: &'static str,
        source: libloading::Error,
    },
}

type InitFn = unsafe extern "C" fn(c_int);
type CusLockHintFn = unsafe extern "C" fn(i32, i32, libc::pid_t) -> c_int;
type LockRelFn = unsafe extern "C" fn(c_int);
type UserScnFn = unsafe extern "C" fn();

/// Capability interface over the vendor hint entry points.
///
/// The dispatcher takes this instead of the concrete binding so tests
/// can substitute a recording fake.
pub trait VendorHints {
    /// Acquire a hint lock; returns an opaque handle.
    fn lock_hint(&self, hint: i32, duration_ms: i32, pid: libc::pid_t) -> i32;

    /// Release a previously acquired hint lock.
    fn lock_rel(&self, handle: i32);

    /// Disable all currently held hints (screen off).
    fn scn_disable_all(&self);

    /// Restore all previously disabled hints (screen on).
    fn scn_restore_all(&self);
}

/// The real `libpowerhal.so` binding.
///
/// The five function slots are resolved in the constructor and never
/// change afterwards. Return values from the vendor calls are not
/// validated; the vendor library owns hint expiry and failure handling.
#[derive(Debug)]
pub struct PowerHalLib {
    // Keeps the shared object mapped for as long as the symbols live.
    _lib: Library,
    init: Symbol<InitFn>,
    cus_lock_hint: Symbol<CusLockHintFn>,
    lock_rel: Symbol<LockRelFn>,
    user_scn_disable_all: Symbol<UserScnFn>,
    user_scn_restore_all: Symbol<UserScnFn>,
}

impl PowerHalLib {
    /// Bind `libpowerhal.so` and run its one-time init handshake.
    pub fn load() -> Result<Self, VendorError> {
        Self::load_from(POWERHAL_LIB)
    }

    /// Bind a vendor library by name. Fails if the library or any of the
    /// five required symbols is missing.
    pub fn load_from(name: &str) -> Result<Self, VendorError> {
        let lib = unsafe { Library::new(name) }.map_err(|e| VendorError::Library {
            name: name.to_string(),
            source: e,
        })?;

        let binding = Self {
            init: resolve(&lib, SYM_INIT)?,
            cus_lock_hint: resolve(&lib, SYM_CUS_LOCK_HINT)?,
            lock_rel: resolve(&lib, SYM_LOCK_REL)?,
            user_scn_disable_all: resolve(&lib, SYM_USER_SCN_DISABLE_ALL)?,
            user_scn_restore_all: resolve(&lib, SYM_USER_SCN_RESTORE_ALL)?,
            _lib: lib,
        };

        tracing::info!("Bound {} and running init", name);
        unsafe { (*binding.init)(1) };

        Ok(binding)
    }
}

fn resolve<T>(lib: &Library, name: &'static str) -> Result<Symbol<T>, VendorError> {
    let symbol = unsafe { lib.get::<T>(name.as_bytes()) }
        .map_err(|e| VendorError::Symbol { name, source: e })?;
    Ok(unsafe { symbol.into_raw() })
}

impl VendorHints for PowerHalLib {
    fn lock_hint(&self, hint: i32, duration_ms: i32, pid: libc::pid_t) -> i32 {
        unsafe { (*self.cus_lock_hint)(hint, duration_ms, pid) }
    }

    fn lock_rel(&self, handle: i32) {
        unsafe { (*self.lock_rel)(handle) }
    }

    fn scn_disable_all(&self) {
        unsafe { (*self.user_scn_disable_all)() }
    }

    fn scn_restore_all(&self) {
        unsafe { (*self.user_scn_restore_all)() }
    }
}
