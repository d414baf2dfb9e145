//! System property access
//!
//! The platform property service is an external collaborator; the real
//! store shells out to `setprop` the same way the rest of the system
//! drives platform utilities. Consumers take a [`PropertyStore`] so tests
//! can substitute a recording fake.

use crate::HalError;
use std::process::Command;

/// Write access to the platform property space.
pub trait PropertyStore {
    fn set(&self, key: &str, value: &str) -> Result<(), HalError>;
}

/// Property store backed by the platform property service.
#[derive(Debug, Default)]
pub struct SystemPropertyStore;

impl SystemPropertyStore {
    pub fn new() -> Self {
        Self
    }
}

impl PropertyStore for SystemPropertyStore {
    fn set(&self, key: &str, value: &str) -> Result<(), HalError> {
        let output = Command::new("setprop").args([key, value]).output()?;

        if !output.status.success() {
            tracing::error!(
                "setprop {} failed: {}",
                key,
                String::from_utf8_lossy(&output.stderr)
            );
            return Err(HalError::Property {
                key: key.to_string(),
            });
        }

        tracing::debug!("Property {} set to {}", key, value);
        Ok(())
    }
}
