//! Server lifecycle state

use std::fmt;

/// Where the managed server is in its lifecycle.
///
/// `Idle → Starting → Ready → Stopping → Idle`; a failed start returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerState {
    #[default]
    Idle,
    Starting,
    Ready,
    Stopping,
}

impl ServerState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ServerState::Ready)
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerState::Idle => write!(f, "idle"),
            ServerState::Starting => write!(f, "starting"),
            ServerState::Ready => write!(f, "ready"),
            ServerState::Stopping => write!(f, "stopping"),
        }
    }
}
