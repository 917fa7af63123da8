//! Lifecycle-specific error types

use std::time::Duration;
use thiserror::Error;

use crate::state::ServerState;

/// Why the server never became ready
#[derive(Error, Debug)]
pub enum ServerStartError {
    #[error("Server process exited with code {}\nstdout: {stdout}\nstderr: {stderr}", display_code(.code))]
    Exited {
        /// `None` when the process was terminated by a signal
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Server did not respond within {}s on port {port}", .timeout.as_secs())]
    Timeout { port: u16, timeout: Duration },
}

fn display_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string()).unwrap_or_else(|| "none (killed by signal)".to_string())
}

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error(transparent)]
    Start(#[from] ServerStartError),

    #[error("Server process already attached (state: {state})")]
    AlreadyStarted { state: ServerState },

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl LifecycleError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, LifecycleError::Start(ServerStartError::Timeout { .. }))
    }

    /// Exit code of a server that died during startup
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            LifecycleError::Start(ServerStartError::Exited { code, .. }) => *code,
            _ => None,
        }
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
