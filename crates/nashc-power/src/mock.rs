//! Recording vendor table for dispatcher tests

use crate::vendor::VendorHints;
use std::sync::{Arc, Mutex};

/// One call into the vendor library, as seen by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorCall {
    LockHint {
        hint: i32,
        duration_ms: i32,
        pid: libc::pid_t,
    },
    LockRel {
        handle: i32,
    },
    ScnDisableAll,
    ScnRestoreAll,
}

/// Vendor table fake that records every call and hands out increasing
/// lock handles starting at 1, so 0 stays the "no lock held" sentinel.
#[derive(Clone)]
pub struct MockVendor {
    calls: Arc<Mutex<Vec<VendorCall>>>,
    next_handle: Arc<Mutex<i32>>,
}

impl MockVendor {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            next_handle: Arc::new(Mutex::new(1)),
        }
    }

    /// All vendor calls in order.
    pub fn calls(&self) -> Vec<VendorCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of lock_hint calls recorded.
    pub fn lock_hint_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, VendorCall::LockHint { .. }))
            .count()
    }
}

impl Default for MockVendor {
    fn default() -> Self {
        Self::new()
    }
}

impl VendorHints for MockVendor {
    fn lock_hint(&self, hint: i32, duration_ms: i32, pid: libc::pid_t) -> i32 {
        self.calls.lock().unwrap().push(VendorCall::LockHint {
            hint,
            duration_ms,
            pid,
        });

        let mut next = self.next_handle.lock().unwrap();
        let handle = *next;
        *next += 1;
        handle
    }

    fn lock_rel(&self, handle: i32) {
        self.calls.lock().unwrap().push(VendorCall::LockRel { handle });
    }

    fn scn_disable_all(&self) {
        self.calls.lock().unwrap().push(VendorCall::ScnDisableAll);
    }

    fn scn_restore_all(&self) {
        self.calls.lock().unwrap().push(VendorCall::ScnRestoreAll);
    }
}
