//! Launch configuration for the server under test

use std::path::PathBuf;
use std::time::Duration;

/// Fixed environment handed to the server on top of the inherited one.
///
/// `PORT` and `BASE_URL` are added per launch once the port is known.
pub const TEST_ENVIRONMENT: [(&str, &str); 6] = [
    ("SESSION_SECRET", "robot-test-secret"),
    ("STRIPE_SECRET_KEY", "sk_test_fake_key_for_robot_tests"),
    ("STRIPE_WEBHOOK_SECRET", "whsec_fake_key_for_robot_tests"),
    ("SENDGRID_API_KEY", "SG.fake_key_for_robot_tests"),
    ("FROM_EMAIL", "test@example.com"),
    ("NODE_ENV", "test"),
];

pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_GRACEFUL_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_KILL_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory of the child
    pub working_dir: PathBuf,
    /// Variables set on the child in addition to `PORT` and `BASE_URL`
    pub env: Vec<(String, String)>,
    /// Overall deadline for the server to answer its first request
    pub startup_timeout: Duration,
    pub poll_interval: Duration,
    /// Per-request timeout of a readiness probe
    pub probe_timeout: Duration,
    /// Wait after SIGTERM before escalating
    pub graceful_timeout: Duration,
    /// Wait after SIGKILL before giving up on the child
    pub kill_timeout: Duration,
}

impl ServerConfig {
    /// `node server.js` run from the application's project root
    pub fn node_app(project_root: impl Into<PathBuf>) -> Self {
        Self::builder("node")
            .arg("server.js")
            .working_dir(project_root)
            .build()
    }

    pub fn builder(program: impl Into<String>) -> ServerConfigBuilder {
        ServerConfigBuilder::new(program)
    }

    /// Full environment overlay for a launch on `port`
    pub fn environment_for(&self, port: u16, base_url: &str) -> Vec<(String, String)> {
        let mut vars = Vec::with_capacity(self.env.len() + 2);
        vars.push(("PORT".to_string(), port.to_string()));
        vars.push(("BASE_URL".to_string(), base_url.to_string()));
        vars.extend(self.env.iter().cloned());
        vars
    }

    /// Human readable command line for logs and errors
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    fn new(program: impl Into<String>) -> Self {
        Self {
            config: ServerConfig {
                program: program.into(),
                args: Vec::new(),
                working_dir: PathBuf::from("."),
                env: TEST_ENVIRONMENT
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                startup_timeout: DEFAULT_STARTUP_TIMEOUT,
                poll_interval: DEFAULT_POLL_INTERVAL,
                probe_timeout: DEFAULT_PROBE_TIMEOUT,
                graceful_timeout: DEFAULT_GRACEFUL_TIMEOUT,
                kill_timeout: DEFAULT_KILL_TIMEOUT,
            },
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.config.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.working_dir = dir.into();
        self
    }

    /// Set or replace one overlay variable
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.config.env.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.config.env.push((key, value)),
        }
        self
    }

    pub fn startup_timeout(mut self, timeout: Duration) -> Self {
        self.config.startup_timeout = timeout;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.config.probe_timeout = timeout;
        self
    }

    pub fn graceful_timeout(mut self, timeout: Duration) -> Self {
        self.config.graceful_timeout = timeout;
        self
    }

    pub fn kill_timeout(mut self, timeout: Duration) -> Self {
        self.config.kill_timeout = timeout;
        self
    }

    pub fn build(self) -> ServerConfig {
        self.config
    }
}
