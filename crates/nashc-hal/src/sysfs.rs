//! Sysfs control node writes
//!
//! Every write is a small ASCII value plus a newline, done in a single
//! attempt. A failed open or write comes back as [`HalError::Node`] so
//! callers can surface it as a service-specific error; there is no retry.

use crate::HalError;
use std::fs;
use std::path::Path;

/// Write an integer to a sysfs node, newline terminated.
pub fn write_node(path: &Path, value: i64) -> Result<(), HalError> {
    write_str_node(path, &value.to_string())
}

/// Write a raw string to a sysfs node, newline terminated.
pub fn write_str_node(path: &Path, value: &str) -> Result<(), HalError> {
    let mut line = String::with_capacity(value.len() + 1);
    line.push_str(value);
    line.push('\n');

    fs::write(path, line).map_err(|e| {
        tracing::error!("Failed to write {} to {}: {}", value, path.display(), e);
        HalError::Node {
            value: value.to_string(),
            path: path.to_path_buf(),
        }
    })
}
