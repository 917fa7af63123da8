//! Common test utilities for fixture store tests
//!
//! The application owns the real schema; these tests create an equivalent
//! copy in a scratch directory so the store has something to work against.

pub mod fixtures;

pub use fixtures::TestDatabase;
