//! Lifecycle management for the web server under test
//!
//! [`ServerManager`] launches the server on a freshly allocated ephemeral
//! port, waits until it answers HTTP, and tears it down with a graceful signal
//! followed by a forced kill when needed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lifecycle::{ServerConfig, ServerManager};
//!
//! # async fn run() -> lifecycle::LifecycleResult<()> {
//! let config = ServerConfig::node_app("/path/to/app");
//! let mut server = ServerManager::new(config)?;
//!
//! let base_url = server.start().await?;
//! // ... drive the application over HTTP at `base_url` ...
//! server.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod output;
pub mod port;
pub mod probe;
pub mod state;
pub mod traits;

pub use config::{ServerConfig, ServerConfigBuilder};
pub use error::{LifecycleError, LifecycleResult, ServerStartError};
pub use manager::{ServerManager, StopOutcome};
pub use port::EphemeralPortAllocator;
pub use probe::HttpReadinessProbe;
pub use state::ServerState;
pub use traits::{PortAllocator, ProbeOutcome, ReadinessProbe};

// Mocks for dependency injection in tests
pub use traits::{MockPortAllocator, MockReadinessProbe};
