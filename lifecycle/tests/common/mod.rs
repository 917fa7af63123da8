//! Common test utilities for lifecycle tests

pub mod helpers;

pub use helpers::{fixed_port, probe_always, probe_ready_after, serve_status, shell_server};
