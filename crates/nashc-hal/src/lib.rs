//! Shared plumbing for the nashc HAL service shims
//!
//! The HAL binaries in this workspace all need the same three things:
//! single-attempt writes to kernel control nodes, access to the platform
//! property service, and a way to publish an implementation object and
//! park the main thread serving requests. This crate holds that glue so
//! each shim stays a thin translation layer.

pub mod mock;
pub mod properties;
pub mod service;
pub mod sysfs;

pub use properties::{PropertyStore, SystemPropertyStore};
pub use service::{HalService, ServicePool};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HalError {
    #[error("Failed to write {value} to {path}")]
    Node { value: String, path: PathBuf },

    #[error("Failed to set property {key}")]
    Property { key: String },

    #[error("Service registration failed: {0}")]
    Registration(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// HAL Result type
pub type Result<T> = std::result::Result<T, HalError>;
