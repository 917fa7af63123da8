//! Capture of child process stdout/stderr
//!
//! Both pipes are drained continuously by background tasks so a chatty server
//! never blocks on a full pipe. Only the most recent [`CAPTURE_LIMIT`] bytes of
//! each stream are kept; they are read back when a failed start needs to
//! report them.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Bytes retained per stream; older output is discarded first
pub const CAPTURE_LIMIT: usize = 64 * 1024;

type Buffer = Arc<Mutex<Vec<u8>>>;

#[derive(Debug)]
pub struct OutputCapture {
    stdout: Buffer,
    stderr: Buffer,
    drains: Vec<JoinHandle<()>>,
}

impl OutputCapture {
    /// Take the child's piped stdout/stderr and start draining them
    pub fn attach(child: &mut Child) -> Self {
        let stdout = Buffer::default();
        let stderr = Buffer::default();
        let mut drains = Vec::with_capacity(2);

        if let Some(pipe) = child.stdout.take() {
            drains.push(spawn_drain(pipe, Arc::clone(&stdout)));
        }
        if let Some(pipe) = child.stderr.take() {
            drains.push(spawn_drain(pipe, Arc::clone(&stderr)));
        }

        Self {
            stdout,
            stderr,
            drains,
        }
    }

    /// Wait up to `wait` for both pipes to close, then return what was read
    ///
    /// A grandchild holding the pipes open would keep the drains alive, so the
    /// wait is bounded and the buffers are read as they stand.
    pub async fn collect(self, wait: Duration) -> (String, String) {
        let drains = join_all(self.drains);
        if tokio::time::timeout(wait, drains).await.is_err() {
            debug!("Output drains still running after {:?}", wait);
        }

        let stdout = String::from_utf8_lossy(&self.stdout.lock().await).into_owned();
        let stderr = String::from_utf8_lossy(&self.stderr.lock().await).into_owned();
        (stdout, stderr)
    }

    /// Stop draining without reading the buffers
    pub fn abort(self) {
        for drain in self.drains {
            drain.abort();
        }
    }
}

async fn join_all(drains: Vec<JoinHandle<()>>) {
    for drain in drains {
        let _ = drain.await;
    }
}

fn spawn_drain<R>(mut pipe: R, buffer: Buffer) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut chunk = [0u8; 4096];
        loop {
            match pipe.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => append_bounded(&mut *buffer.lock().await, &chunk[..n], CAPTURE_LIMIT),
            }
        }
    })
}

fn append_bounded(buffer: &mut Vec<u8>, chunk: &[u8], limit: usize) {
    buffer.extend_from_slice(chunk);
    if buffer.len() > limit {
        let excess = buffer.len() - limit;
        buffer.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Stdio;
    use tokio::process::Command;

    #[test]
    fn test_append_bounded_keeps_tail() {
        let mut buffer = Vec::new();
        append_bounded(&mut buffer, b"hello ", 8);
        append_bounded(&mut buffer, b"world", 8);

        assert_eq!(buffer, b"lo world");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_chatty_child_is_capped() {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg("head -c 200000 /dev/zero | tr '\\0' 'x'; echo; echo last-line >&2; echo tail")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        let capture = OutputCapture::attach(&mut child);
        child.wait().await.unwrap();

        let (stdout, stderr) = capture.collect(Duration::from_secs(5)).await;

        assert_eq!(stdout.len(), CAPTURE_LIMIT);
        assert!(stdout.ends_with("tail\n"));
        assert_eq!(stderr.trim(), "last-line");
    }
}
