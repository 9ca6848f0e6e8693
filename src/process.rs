//! Piped child process handle for the debugger
//!
//! Spawns LLDB with stdin piped and stdout/stderr merged into one shared
//! buffer. LLDB prints diagnostics on both streams and the transaction layer
//! needs to see all of it, so both pipes feed the same drain.

use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tracing::{debug, warn};

use crate::error::{DebugError, Result};

/// Handle to a spawned debugger process with piped stdio
pub struct ProcessHandle {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    /// Merged stdout+stderr bytes, filled by background pump tasks
    output: Arc<tokio::sync::Mutex<Vec<u8>>>,
}

impl ProcessHandle {
    /// Spawn a process with stdin piped and stdout/stderr drained into a
    /// shared buffer.
    pub fn spawn(program: &Path, args: &[String]) -> Result<Self> {
        debug!("Spawning {} {:?}", program.display(), args);

        let mut child = Command::new(program)
            .args(args)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DebugError::SpawnFailed(format!("{}: {}", program.display(), e)))?;

        let stdin = child.stdin.take();
        let output = Arc::new(tokio::sync::Mutex::new(Vec::new()));

        if let Some(stdout) = child.stdout.take() {
            pump(stdout, Arc::clone(&output));
        }
        if let Some(stderr) = child.stderr.take() {
            pump(stderr, Arc::clone(&output));
        }

        Ok(Self {
            child: Some(child),
            stdin,
            output,
        })
    }

    /// Write bytes to the process's stdin. The caller appends the line
    /// terminator.
    pub async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let stdin = self.stdin.as_mut().ok_or(DebugError::ProcessNotStarted)?;

        stdin
            .write_all(bytes)
            .await
            .map_err(|e| DebugError::WriteFailed(e.to_string()))?;
        stdin
            .flush()
            .await
            .map_err(|e| DebugError::WriteFailed(e.to_string()))?;

        Ok(())
    }

    /// Drain whatever output has been buffered so far. Returns an empty vec
    /// when nothing is pending; never blocks on the child.
    pub async fn read_available(&self) -> Vec<u8> {
        std::mem::take(&mut *self.output.lock().await)
    }

    /// Force-end the process and release the pipes. Idempotent: a second
    /// call is a no-op.
    pub async fn terminate(&mut self) {
        self.stdin = None;

        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                // Already exited — nothing to do
                debug!("Kill on terminate: {}", e);
            }
            if let Err(e) = child.wait().await {
                warn!("Wait after kill: {}", e);
            }
        }
    }

    /// Check if the process is still running
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut().map(|c| c.try_wait()) {
            Some(Ok(None)) => true,
            _ => false,
        }
    }
}

/// Copy a child output stream into the shared buffer until EOF
fn pump<R>(mut stream: R, output: Arc<tokio::sync::Mutex<Vec<u8>>>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut chunk = [0u8; 4096];
        loop {
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => output.lock().await.extend_from_slice(&chunk[..n]),
            }
        }
    });
}
