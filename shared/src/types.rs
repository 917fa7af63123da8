//! Core shared types and identifiers

use std::fmt;

/// Harness component that emitted a log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// SQLite fixture store
    Fixtures,
    /// Server under test lifecycle manager
    Server,
    /// Command-line driver
    Tester,
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::Fixtures => write!(f, "fixtures"),
            ComponentId::Server => write!(f, "server"),
            ComponentId::Tester => write!(f, "tester"),
        }
    }
}
