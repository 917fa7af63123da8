//! Builders for scripted servers, mock collaborators and stub HTTP endpoints

#![allow(dead_code)]

use std::time::Duration;

use axum::{Router, http::StatusCode, routing::get};
use lifecycle::{MockPortAllocator, MockReadinessProbe, ProbeOutcome, ServerConfig, ServerConfigBuilder};

/// `sh -c <script>` with timings short enough for tests
pub fn shell_server(script: &str) -> ServerConfigBuilder {
    ServerConfig::builder("sh")
        .arg("-c")
        .arg(script)
        .startup_timeout(Duration::from_secs(5))
        .poll_interval(Duration::from_millis(50))
        .graceful_timeout(Duration::from_secs(2))
        .kill_timeout(Duration::from_secs(2))
}

/// Allocator that always hands out `port`
pub fn fixed_port(port: u16) -> MockPortAllocator {
    let mut allocator = MockPortAllocator::new();
    allocator.expect_allocate().returning(move || Ok(port));
    allocator
}

/// Probe that reports the same outcome forever
pub fn probe_always(outcome: ProbeOutcome) -> MockReadinessProbe {
    let mut probe = MockReadinessProbe::new();
    probe.expect_probe().returning(move |_| outcome.clone());
    probe
}

/// Probe that is unreachable for `n - 1` calls and ready from call `n` on
pub fn probe_ready_after(n: u32) -> MockReadinessProbe {
    let mut calls = 0;
    let mut probe = MockReadinessProbe::new();
    probe.expect_probe().returning(move |_| {
        calls += 1;
        if calls >= n {
            ProbeOutcome::Ready
        } else {
            ProbeOutcome::Unreachable("connection refused".to_string())
        }
    });
    probe
}

/// Serve `status` for `GET /` on an ephemeral loopback port; returns the port
pub async fn serve_status(status: StatusCode) -> u16 {
    let app = Router::new().route("/", get(move || async move { status }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    port
}
