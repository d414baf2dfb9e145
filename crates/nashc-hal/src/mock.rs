//! Recording fakes for testing without the platform services

use crate::{HalError, PropertyStore};
use std::sync::{Arc, Mutex};

/// Property store that records writes instead of touching the platform.
#[derive(Clone, Default)]
pub struct RecordingPropertyStore {
    values: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes in order.
    pub fn values(&self) -> Vec<(String, String)> {
        self.values.lock().unwrap().clone()
    }

    /// Last value written for a key, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

impl PropertyStore for RecordingPropertyStore {
    fn set(&self, key: &str, value: &str) -> Result<(), HalError> {
        self.values
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}
