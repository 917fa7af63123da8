//! Deterministic SQLite fixtures for the end-to-end suite
//!
//! [`FixtureStore`] owns a single connection to the database the server under
//! test reads from. It can wipe the fixture tables back to a minimal baseline
//! (default settings plus one administrator) and seed additional rows for
//! individual scenarios.
//!
//! The schema itself belongs to the application; the store assumes the tables
//! already exist.

pub mod defaults;
pub mod error;
pub mod row;
pub mod seeds;
pub mod store;

pub use error::{FixtureError, FixtureResult};
pub use row::QueryRow;
pub use seeds::{AdminRole, AdminSeed, MemberSeed, MemberStatus, PaymentSeed};
pub use store::FixtureStore;
