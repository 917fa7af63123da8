//! Shared plumbing for the end-to-end harness crates
//!
//! Holds only what both the fixture store and the server lifecycle manager
//! need: component identifiers for log attribution, logging setup, harness
//! configuration and the configuration error type.

pub mod config;
pub mod errors;
pub mod logging;
pub mod types;

pub use config::HarnessConfig;
pub use errors::*;
pub use types::*;
