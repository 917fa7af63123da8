//! Collaborator traits with mockall annotations for testing
//!
//! [`ServerManager`](crate::ServerManager) reaches the outside world through
//! these seams so tests can pin the port and script readiness.

/// Result of a single readiness probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered with a 2xx status
    Ready,
    /// The server answered with another status
    NotReady(u16),
    /// No HTTP response (connection refused, timeout, ...)
    Unreachable(String),
}

impl ProbeOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ProbeOutcome::Ready)
    }
}

/// Source of a free TCP port for the next launch
#[mockall::automock]
pub trait PortAllocator: Send + Sync {
    /// Reserve and immediately release a port
    ///
    /// The port is not held, so another process may take it before the server
    /// binds it.
    fn allocate(&self) -> std::io::Result<u16>;
}

/// One readiness check against a base URL
#[mockall::automock]
#[async_trait::async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Issue one request; transport failures are reported, never raised
    async fn probe(&self, url: &str) -> ProbeOutcome;
}
