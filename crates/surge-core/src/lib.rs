//! Core constants shared across surge-rules crates.
//!
//! This crate provides:
//! - Default configuration values
//! - Error type labels for metrics/logging
//! - Project version

pub mod defaults;
pub mod errors;

pub use defaults::*;
pub use errors::*;

/// Project version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
