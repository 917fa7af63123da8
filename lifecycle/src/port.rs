//! Ephemeral port allocation

use std::net::TcpListener;

use crate::traits::PortAllocator;

/// Lets the OS pick a free port by binding port 0 on all interfaces
#[derive(Debug, Clone, Copy, Default)]
pub struct EphemeralPortAllocator;

impl PortAllocator for EphemeralPortAllocator {
    fn allocate(&self) -> std::io::Result<u16> {
        let listener = TcpListener::bind(("0.0.0.0", 0))?;
        let port = listener.local_addr()?.port();
        drop(listener);
        Ok(port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocates_nonzero_port() {
        let port = EphemeralPortAllocator.allocate().unwrap();
        assert_ne!(port, 0);
    }

    #[test]
    fn test_port_is_released() {
        let port = EphemeralPortAllocator.allocate().unwrap();
        // The socket is gone, so the port can be bound again right away
        let listener = TcpListener::bind(("0.0.0.0", port));
        assert!(listener.is_ok(), "Port {port} should be free after allocation");
    }
}
