//! Command-line front end for the end-to-end test harness
//!
//! Wraps the fixture store and the server lifecycle manager so a suite (or a
//! developer at a shell) can reset the database, seed rows, inspect tables and
//! run the application under test on an ephemeral port.

pub mod cli;
pub mod commands;

pub use cli::{Args, Command, SeedCommand};
pub use commands::run;
