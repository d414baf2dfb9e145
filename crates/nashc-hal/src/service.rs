//! HAL service host
//!
//! Publishes implementation objects by descriptor and parks the calling
//! thread serving requests. The RPC transport itself belongs to the
//! platform; this host only owns registration bookkeeping, the lifetime
//! of the registered objects, and the blocking serve loop.

use crate::HalError;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default location for service registration records.
pub const RUNTIME_DIR: &str = "/run/hal";

/// A HAL implementation object that can be published to the service pool.
pub trait HalService: Send + Sync {
    /// Service name under which the object is published.
    fn descriptor(&self) -> &str;
}

/// Request-serving pool for a HAL process.
///
/// Registered objects are held alive by the pool for as long as it runs.
/// `join` never returns during normal operation; the binary treats a
/// return as fatal.
pub struct ServicePool {
    threads: usize,
    caller_will_join: bool,
    runtime_dir: PathBuf,
    services: Vec<Arc<dyn HalService>>,
}

impl ServicePool {
    /// Configure a pool with the given thread count. When
    /// `caller_will_join` is set the calling thread serves requests too.
    pub fn with_threads(threads: usize, caller_will_join: bool) -> Self {
        Self {
            threads,
            caller_will_join,
            runtime_dir: PathBuf::from(RUNTIME_DIR),
            services: Vec::new(),
        }
    }

    /// Override the runtime directory used for registration records.
    pub fn with_runtime_dir(mut self, dir: PathBuf) -> Self {
        self.runtime_dir = dir;
        self
    }

    /// Publish a service object under its descriptor.
    pub fn register(&mut self, service: Arc<dyn HalService>) -> Result<(), HalError> {
        let name = service.descriptor().to_string();

        fs::create_dir_all(&self.runtime_dir)
            .map_err(|e| HalError::Registration(format!("{}: {}", self.runtime_dir.display(), e)))?;

        // Descriptors contain '/', which is not valid in a file name.
        let record = self.runtime_dir.join(name.replace('/', "."));
        fs::write(&record, format!("{}\n", std::process::id()))
            .map_err(|e| HalError::Registration(format!("{name}: {e}")))?;

        tracing::info!("Registered service {}", name);
        self.services.push(service);
        Ok(())
    }

    /// Names of the currently registered services.
    pub fn registered(&self) -> Vec<String> {
        self.services
            .iter()
            .map(|s| s.descriptor().to_string())
            .collect()
    }

    /// Block serving requests until the process is told to stop.
    pub fn join(&self) -> Result<(), HalError> {
        install_signal_handlers()?;

        tracing::info!(
            "Serving {} service(s) with {} thread(s) (caller joins: {})",
            self.services.len(),
            self.threads.max(1),
            self.caller_will_join
        );

        loop {
            thread::sleep(Duration::from_secs(1));
        }
    }
}

/// Install handlers so SIGTERM/SIGINT stop the process cleanly.
fn install_signal_handlers() -> Result<(), HalError> {
    use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

    let action = SigAction::new(
        SigHandler::Handler(handle_signal),
        SaFlags::empty(),
        SigSet::empty(),
    );

    unsafe {
        sigaction(Signal::SIGTERM, &action)
            .map_err(|e| HalError::Registration(format!("sigaction: {e}")))?;
        sigaction(Signal::SIGINT, &action)
            .map_err(|e| HalError::Registration(format!("sigaction: {e}")))?;
    }

    Ok(())
}

extern "C" fn handle_signal(sig: i32) {
    if sig == libc::SIGTERM || sig == libc::SIGINT {
        std::process::exit(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct FakeService;

    impl HalService for FakeService {
        fn descriptor(&self) -> &str {
            "android.hardware.test.ITest/default"
        }
    }

    #[test]
    fn test_register_records_service() {
        let dir = TempDir::new().unwrap();
        let mut pool =
            ServicePool::with_threads(1, true).with_runtime_dir(dir.path().to_path_buf());

        pool.register(Arc::new(FakeService)).unwrap();

        assert_eq!(
            pool.registered(),
            vec!["android.hardware.test.ITest/default".to_string()]
        );

        let record = dir.path().join("android.hardware.test.ITest.default");
        let contents = fs::read_to_string(record).unwrap();
        assert_eq!(contents.trim(), std::process::id().to_string());
    }

    #[test]
    fn test_register_fails_when_runtime_dir_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("hal");
        fs::write(&blocker, "not a directory").unwrap();

        let mut pool = ServicePool::with_threads(1, true).with_runtime_dir(blocker);
        let err = pool.register(Arc::new(FakeService)).unwrap_err();

        assert!(matches!(err, HalError::Registration(_)));
    }
}
