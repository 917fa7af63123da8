//! HTTP readiness probe

use std::time::Duration;

use reqwest::Client;
use tracing::trace;

use crate::error::LifecycleResult;
use crate::traits::{ProbeOutcome, ReadinessProbe};

/// Sends `GET url` and treats any 2xx status as ready
///
/// Requests go straight to the server; proxy variables in the environment are
/// ignored.
#[derive(Debug, Clone)]
pub struct HttpReadinessProbe {
    client: Client,
    timeout: Duration,
}

impl HttpReadinessProbe {
    pub fn new(timeout: Duration) -> LifecycleResult<Self> {
        let client = Client::builder().no_proxy().build()?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait::async_trait]
impl ReadinessProbe for HttpReadinessProbe {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.client.get(url).timeout(self.timeout).send().await {
            Ok(response) if response.status().is_success() => ProbeOutcome::Ready,
            Ok(response) => ProbeOutcome::NotReady(response.status().as_u16()),
            Err(e) => {
                trace!("Probe of {} failed: {}", url, e);
                ProbeOutcome::Unreachable(e.to_string())
            }
        }
    }
}
