//! Server process lifecycle
//!
//! Start: allocate port → spawn → poll until 2xx, exit or deadline.
//! Stop: SIGTERM → wait → SIGKILL → wait → forget the child.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use shared::{ComponentId, component_debug, component_error, component_info, component_warn};
use tokio::process::{Child, Command};
use tokio::time::{Instant, sleep, timeout};

use crate::config::ServerConfig;
use crate::error::{LifecycleError, LifecycleResult, ServerStartError};
use crate::output::OutputCapture;
use crate::port::EphemeralPortAllocator;
use crate::probe::HttpReadinessProbe;
use crate::state::ServerState;
use crate::traits::{PortAllocator, ProbeOutcome, ReadinessProbe};

/// Upper bound on collecting output after the child has already exited
const OUTPUT_COLLECT_WAIT: Duration = Duration::from_secs(1);

/// How a call to [`ServerManager::stop`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// No child was attached
    NotRunning,
    /// The child exited after SIGTERM
    Graceful,
    /// The child needed SIGKILL
    Forced,
    /// The child outlived SIGKILL's wait and was detached anyway
    Abandoned,
}

#[derive(Debug)]
struct RunningServer {
    child: Child,
    output: OutputCapture,
}

pub fn base_url_for(port: u16) -> String {
    format!("http://localhost:{port}")
}

/// Owns at most one server child process
pub struct ServerManager<P = EphemeralPortAllocator, R = HttpReadinessProbe>
where
    P: PortAllocator,
    R: ReadinessProbe,
{
    config: ServerConfig,
    allocator: P,
    probe: R,
    state: ServerState,
    port: Option<u16>,
    server: Option<RunningServer>,
}

impl ServerManager {
    /// Manager using a real ephemeral port and HTTP probing
    pub fn new(config: ServerConfig) -> LifecycleResult<Self> {
        let probe = HttpReadinessProbe::new(config.probe_timeout)?;
        Ok(Self::with_collaborators(config, EphemeralPortAllocator, probe))
    }
}

impl<P, R> ServerManager<P, R>
where
    P: PortAllocator,
    R: ReadinessProbe,
{
    pub fn with_collaborators(config: ServerConfig, allocator: P, probe: R) -> Self {
        Self {
            config,
            allocator,
            probe,
            state: ServerState::Idle,
            port: None,
            server: None,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    /// Port of the current or most recent launch
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn base_url(&self) -> Option<String> {
        self.port.map(base_url_for)
    }

    /// OS process id of the attached child
    pub fn pid(&self) -> Option<u32> {
        self.server.as_ref().and_then(|server| server.child.id())
    }

    pub fn is_attached(&self) -> bool {
        self.server.is_some()
    }

    /// Launch the server and wait until it answers HTTP
    ///
    /// Returns the base URL on success. A child that exits before becoming
    /// ready is reported with its exit code and captured output and is
    /// forgotten. A child that misses the deadline stays attached so
    /// [`stop`](Self::stop) can reap it.
    pub async fn start(&mut self) -> LifecycleResult<String> {
        if self.server.is_some() {
            return Err(LifecycleError::AlreadyStarted { state: self.state });
        }

        let port = self.allocator.allocate()?;
        let base_url = base_url_for(port);
        self.port = Some(port);

        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .current_dir(&self.config.working_dir)
            .envs(self.config.environment_for(port, &base_url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|source| LifecycleError::Spawn {
            program: self.config.command_line(),
            source,
        })?;
        let output = OutputCapture::attach(&mut child);

        component_info!(
            ComponentId::Server,
            "🚀 Started `{}` (pid {:?}) on port {}",
            self.config.command_line(),
            child.id(),
            port
        );

        self.server = Some(RunningServer { child, output });
        self.state = ServerState::Starting;

        self.wait_until_ready(port, base_url).await
    }

    async fn wait_until_ready(&mut self, port: u16, base_url: String) -> LifecycleResult<String> {
        let deadline = Instant::now() + self.config.startup_timeout;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            match self.probe.probe(&base_url).await {
                ProbeOutcome::Ready => {
                    self.state = ServerState::Ready;
                    component_info!(
                        ComponentId::Server,
                        "✅ Server ready at {} after {} probe(s)",
                        base_url,
                        attempts
                    );
                    return Ok(base_url);
                }
                ProbeOutcome::NotReady(status) => {
                    component_debug!(ComponentId::Server, "Probe {} returned HTTP {}", attempts, status);
                }
                ProbeOutcome::Unreachable(reason) => {
                    component_debug!(ComponentId::Server, "Probe {} unreachable: {}", attempts, reason);
                }
            }

            if let Some(status) = self.poll_exit()? {
                return Err(self.exited_during_start(status).await);
            }

            if Instant::now() >= deadline {
                // Start failed, but the child stays attached for stop()
                self.state = ServerState::Idle;
                component_warn!(
                    ComponentId::Server,
                    "⏰ Server on port {} not ready after {:?}; leaving it attached",
                    port,
                    self.config.startup_timeout
                );
                return Err(ServerStartError::Timeout {
                    port,
                    timeout: self.config.startup_timeout,
                }
                .into());
            }

            sleep(self.config.poll_interval).await;
        }
    }

    fn poll_exit(&mut self) -> LifecycleResult<Option<ExitStatus>> {
        match self.server.as_mut() {
            Some(server) => Ok(server.child.try_wait()?),
            None => Ok(None),
        }
    }

    async fn exited_during_start(&mut self, status: ExitStatus) -> LifecycleError {
        self.state = ServerState::Idle;
        let (stdout, stderr) = match self.server.take() {
            Some(server) => server.output.collect(OUTPUT_COLLECT_WAIT).await,
            None => (String::new(), String::new()),
        };

        component_error!(
            ComponentId::Server,
            "❌ Server exited during startup with {}",
            status
        );

        ServerStartError::Exited {
            code: status.code(),
            stdout,
            stderr,
        }
        .into()
    }

    /// Terminate the attached child, escalating to SIGKILL
    ///
    /// Never fails because the child is slow to die: after the kill wait the
    /// handle is dropped and [`StopOutcome::Abandoned`] is reported.
    pub async fn stop(&mut self) -> LifecycleResult<StopOutcome> {
        let Some(mut server) = self.server.take() else {
            component_debug!(ComponentId::Server, "Stop requested with no server attached");
            return Ok(StopOutcome::NotRunning);
        };

        self.state = ServerState::Stopping;
        let outcome = self.terminate(&mut server.child).await;
        server.output.abort();
        self.state = ServerState::Idle;

        if outcome == StopOutcome::Abandoned {
            component_warn!(
                ComponentId::Server,
                "🔨 Server did not exit after SIGKILL; handle released"
            );
        } else {
            component_info!(ComponentId::Server, "🛑 Server stopped ({:?})", outcome);
        }

        Ok(outcome)
    }

    async fn terminate(&self, child: &mut Child) -> StopOutcome {
        send_terminate(child);

        if timeout(self.config.graceful_timeout, child.wait()).await.is_ok() {
            return StopOutcome::Graceful;
        }

        component_warn!(
            ComponentId::Server,
            "Server ignored SIGTERM for {:?}, sending SIGKILL",
            self.config.graceful_timeout
        );
        if let Err(e) = child.start_kill() {
            component_debug!(ComponentId::Server, "SIGKILL failed: {}", e);
        }

        match timeout(self.config.kill_timeout, child.wait()).await {
            Ok(_) => StopOutcome::Forced,
            Err(_) => StopOutcome::Abandoned,
        }
    }
}

impl<P, R> Drop for ServerManager<P, R>
where
    P: PortAllocator,
    R: ReadinessProbe,
{
    fn drop(&mut self) {
        if let Some(server) = self.server.as_mut() {
            let _ = server.child.start_kill();
        }
    }
}

#[cfg(unix)]
fn send_terminate(child: &mut Child) {
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    let Some(pid) = child.id() else {
        // Already reaped
        return;
    };

    match signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        Ok(()) => {
            component_debug!(ComponentId::Server, "📤 Sent SIGTERM to {}", pid);
        }
        Err(nix::errno::Errno::ESRCH) => {}
        Err(e) => {
            component_debug!(ComponentId::Server, "SIGTERM to {} failed: {}", pid, e);
        }
    }
}

#[cfg(not(unix))]
fn send_terminate(child: &mut Child) {
    let _ = child.start_kill();
}
