//! Run-to-completion command runner
//!
//! Used to build and resolve the debuggee before a session starts. The
//! debugger's own process does NOT go through here — it needs interactive
//! piping, not run-to-completion semantics.

use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{DebugError, Result};

/// Result of an external command execution
#[derive(Debug)]
pub struct ExecResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecResult {
    /// Stdout and stderr concatenated, for surfacing build logs as one blob
    pub fn combined_output(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }
}

/// Run a command to completion and capture its output
pub async fn run_command(
    program: &str,
    args: &[String],
    workdir: Option<&Path>,
) -> Result<ExecResult> {
    debug!("Running: {} {:?}", program, args);

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(wd) = workdir {
        cmd.current_dir(wd);
    }

    let output = cmd
        .output()
        .await
        .map_err(|e| DebugError::CommandFailed(format!("{}: {}", program, e)))?;

    Ok(ExecResult {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

/// Build the Swift package at `project_root` in debug configuration
pub async fn build_package(project_root: &Path) -> Result<ExecResult> {
    info!("Building package at {}", project_root.display());

    let args = vec![
        "build".to_string(),
        "--package-path".to_string(),
        project_root.display().to_string(),
    ];
    run_command("swift", &args, None).await
}

/// Where `swift build` leaves the debug binary for an executable target
pub fn debug_binary_path(project_root: &Path, target: &str) -> PathBuf {
    project_root.join(".build").join("debug").join(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_command_captures_stdout() {
        let result = run_command("echo", &["hello".to_string()], None).await.unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout.trim(), "hello");
        assert!(result.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_run_command_failure_exit_code() {
        let result = run_command("sh", &["-c".to_string(), "exit 3".to_string()], None)
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, 3);
    }

    #[tokio::test]
    async fn test_run_command_missing_binary() {
        let result = run_command("nonexistent_binary_12345", &[], None).await;
        assert!(matches!(result, Err(DebugError::CommandFailed(_))));
    }

    #[tokio::test]
    async fn test_run_command_workdir() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_command("pwd", &[], Some(dir.path())).await.unwrap();
        assert!(result.success);
        assert!(result.stdout.trim().ends_with(
            dir.path().file_name().unwrap().to_str().unwrap()
        ));
    }

    #[test]
    fn test_debug_binary_path() {
        let path = debug_binary_path(Path::new("/work/proj"), "App");
        assert_eq!(path, PathBuf::from("/work/proj/.build/debug/App"));
    }

    #[test]
    fn test_combined_output() {
        let result = ExecResult {
            success: false,
            stdout: "compiling".to_string(),
            stderr: "error: boom".to_string(),
            exit_code: 1,
        };
        assert_eq!(result.combined_output(), "compiling\nerror: boom");

        let result = ExecResult {
            success: true,
            stdout: String::new(),
            stderr: "warning only".to_string(),
            exit_code: 0,
        };
        assert_eq!(result.combined_output(), "warning only");
    }
}
