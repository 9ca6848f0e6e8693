//! Debug session state and lifecycle
//!
//! One session owns one LLDB process plus the bookkeeping the REPL itself
//! won't give back: which breakpoints were requested, whether the debuggee
//! has been launched, and where the target binary lives.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{DebugError, Result};
use crate::process::ProcessHandle;
use crate::transaction;

/// A breakpoint as requested by the caller. Recorded verbatim — the file is
/// not checked for existence here, that is LLDB's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoint {
    pub file: String,
    pub line: u32,
    pub condition: Option<String>,
}

/// One tracked debugging interaction, owning one LLDB process
pub struct DebugSession {
    pub session_id: String,
    /// Build target name (e.g. the Swift package executable target)
    pub target: String,
    pub project_root: PathBuf,
    /// Debuggee launch arguments, fixed at creation
    pub launch_args: Vec<String>,
    /// Resolved debuggee binary, set once `target create` succeeds
    pub executable: Option<PathBuf>,
    /// Has the debuggee been launched inside this debugger process
    pub running: bool,
    /// Insertion order = UI order; duplicates by file+line are allowed
    pub breakpoints: Vec<Breakpoint>,
    settle_interval: Duration,
    startup_grace: Duration,
    process: Option<ProcessHandle>,
}

impl DebugSession {
    pub fn new(
        session_id: String,
        target: String,
        project_root: PathBuf,
        launch_args: Vec<String>,
        settle_interval: Duration,
        startup_grace: Duration,
    ) -> Self {
        Self {
            session_id,
            target,
            project_root,
            launch_args,
            executable: None,
            running: false,
            breakpoints: Vec::new(),
            settle_interval,
            startup_grace,
            process: None,
        }
    }

    /// Spawn the debugger process and wait out its startup banner.
    ///
    /// On spawn failure the session has no process; the caller must evict it
    /// from the registry so no dangling entry remains.
    pub async fn start(&mut self, lldb_path: &Path) -> Result<()> {
        let handle = ProcessHandle::spawn(lldb_path, &[])?;
        self.process = Some(handle);

        // Let LLDB print its banner, then discard it so it can't be mistaken
        // for the first command's response
        tokio::time::sleep(self.startup_grace).await;
        if let Some(process) = &self.process {
            let _ = process.read_available().await;
        }

        info!("Session {} started lldb", self.session_id);
        Ok(())
    }

    /// Send one raw command through the transaction layer
    pub async fn send_command(&mut self, command: &str) -> Result<String> {
        let settle = self.settle_interval;
        let process = self
            .process
            .as_mut()
            .ok_or(DebugError::ProcessNotStarted)?;
        transaction::send_command(process, command, settle).await
    }

    /// Point the debugger at the resolved debuggee binary
    pub async fn create_target(&mut self, executable: &Path) -> Result<String> {
        let response = self
            .send_command(&format!("target create \"{}\"", executable.display()))
            .await?;
        self.executable = Some(executable.to_path_buf());
        Ok(response)
    }

    /// Set a breakpoint, with an optional condition, and record it.
    ///
    /// No dedupe: requesting the same file+line twice sets it twice.
    pub async fn add_breakpoint(
        &mut self,
        file: &str,
        line: u32,
        condition: Option<&str>,
    ) -> Result<String> {
        let mut response = self
            .send_command(&breakpoint_set_command(file, line))
            .await?;

        if let Some(cond) = condition {
            let cond_response = self.send_command(&breakpoint_condition_command(cond)).await?;
            if !cond_response.is_empty() {
                response.push('\n');
                response.push_str(&cond_response);
            }
        }

        self.breakpoints.push(Breakpoint {
            file: file.to_string(),
            line,
            condition: condition.map(str::to_string),
        });

        Ok(response)
    }

    /// Step the debuggee. Unrecognized kinds fall back to stepping over.
    pub async fn step(&mut self, kind: &str) -> Result<String> {
        self.send_command(step_command(kind)).await
    }

    /// Launch the debuggee on the first call, resume it afterwards
    pub async fn continue_execution(&mut self) -> Result<String> {
        let command = self.continue_command();
        let response = self.send_command(&command).await?;
        self.running = true;
        Ok(response)
    }

    /// The command `continue_execution` will issue in the current state
    pub fn continue_command(&self) -> String {
        if self.running {
            "continue".to_string()
        } else if self.launch_args.is_empty() {
            "process launch".to_string()
        } else {
            format!("process launch -- {}", self.launch_args.join(" "))
        }
    }

    /// Inspect program state. An expression wins over a variable name; with
    /// neither, print all locals in the current frame.
    pub async fn inspect(
        &mut self,
        variable: Option<&str>,
        expression: Option<&str>,
    ) -> Result<String> {
        self.send_command(&inspect_command(variable, expression)).await
    }

    /// End the debugger process: best-effort `quit`, then force kill.
    /// Idempotent — terminating an already-dead session is a no-op.
    pub async fn terminate(&mut self) {
        if let Some(mut process) = self.process.take() {
            // Graceful quit first; the response (and any write failure on an
            // already-dead pipe) is deliberately ignored
            if let Err(e) = transaction::send_command(&mut process, "quit", self.settle_interval).await
            {
                warn!("Quit on terminate (non-fatal): {}", e);
            }
            process.terminate().await;
            info!("Session {} terminated", self.session_id);
        }
        self.running = false;
    }

    pub fn has_process(&self) -> bool {
        self.process.is_some()
    }
}

/// LLDB vocabulary for a step kind: over, into, out. Anything else steps over.
pub fn step_command(kind: &str) -> &'static str {
    match kind {
        "into" => "step",
        "out" => "finish",
        _ => "next",
    }
}

pub fn breakpoint_set_command(file: &str, line: u32) -> String {
    format!("breakpoint set --file {} --line {}", file, line)
}

/// Condition applies to the most recently set breakpoint, passed verbatim
pub fn breakpoint_condition_command(condition: &str) -> String {
    format!("breakpoint modify --condition '{}'", condition)
}

pub fn inspect_command(variable: Option<&str>, expression: Option<&str>) -> String {
    if let Some(expr) = expression {
        format!("expression {}", expr)
    } else if let Some(var) = variable {
        format!("frame variable {}", var)
    } else {
        "frame variable".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> DebugSession {
        DebugSession::new(
            "test-session".to_string(),
            "App".to_string(),
            PathBuf::from("/tmp/project"),
            Vec::new(),
            Duration::from_millis(10),
            Duration::from_millis(10),
        )
    }

    #[test]
    fn test_new_session_state() {
        let session = test_session();
        assert_eq!(session.target, "App");
        assert!(!session.running);
        assert!(session.breakpoints.is_empty());
        assert!(session.executable.is_none());
        assert!(!session.has_process());
    }

    #[test]
    fn test_step_vocabulary() {
        assert_eq!(step_command("over"), "next");
        assert_eq!(step_command("into"), "step");
        assert_eq!(step_command("out"), "finish");
        // Permissive default: unknown kinds step over
        assert_eq!(step_command("sideways"), "next");
        assert_eq!(step_command(""), "next");
    }

    #[test]
    fn test_breakpoint_set_command() {
        assert_eq!(
            breakpoint_set_command("main.swift", 42),
            "breakpoint set --file main.swift --line 42"
        );
    }

    #[test]
    fn test_breakpoint_condition_verbatim() {
        assert_eq!(
            breakpoint_condition_command("x > 5"),
            "breakpoint modify --condition 'x > 5'"
        );
    }

    #[test]
    fn test_inspect_precedence() {
        // Expression wins silently when both are supplied
        assert_eq!(
            inspect_command(Some("count"), Some("count + 1")),
            "expression count + 1"
        );
        assert_eq!(inspect_command(Some("count"), None), "frame variable count");
        assert_eq!(inspect_command(None, None), "frame variable");
    }

    #[test]
    fn test_continue_command_launch_then_resume() {
        let mut session = test_session();
        assert_eq!(session.continue_command(), "process launch");
        session.running = true;
        assert_eq!(session.continue_command(), "continue");
    }

    #[test]
    fn test_continue_command_with_launch_args() {
        let mut session = test_session();
        session.launch_args = vec!["--verbose".to_string(), "input.txt".to_string()];
        assert_eq!(session.continue_command(), "process launch -- --verbose input.txt");
    }

    #[tokio::test]
    async fn test_send_command_without_start() {
        let mut session = test_session();
        assert!(session.send_command("version").await.is_err());
    }

    #[tokio::test]
    async fn test_terminate_without_process_is_noop() {
        let mut session = test_session();
        session.terminate().await;
        session.terminate().await;
        assert!(!session.running);
        assert!(!session.has_process());
    }

    #[tokio::test]
    async fn test_session_against_shell_repl() {
        // /bin/sh stands in for lldb: interactive, line-oriented, unframed
        let mut session = test_session();
        session.start(&PathBuf::from("/bin/sh")).await.unwrap();
        assert!(session.has_process());

        // Generous settle so the shell's output lands before the drain
        session.settle_interval = Duration::from_millis(500);
        let response = session.send_command("echo ready").await.unwrap();
        assert_eq!(response, "ready");

        session.terminate().await;
        assert!(!session.has_process());
        assert!(!session.running);
    }

    #[tokio::test]
    async fn test_start_spawn_failure_leaves_no_process() {
        let mut session = test_session();
        let result = session.start(&PathBuf::from("/nonexistent/lldb_12345")).await;
        assert!(result.is_err());
        assert!(!session.has_process());
    }

    #[tokio::test]
    async fn test_breakpoint_records_in_insertion_order() {
        let mut session = test_session();
        session.start(&PathBuf::from("/bin/sh")).await.unwrap();

        session.add_breakpoint("main.swift", 42, None).await.unwrap();
        session.add_breakpoint("util.swift", 7, Some("x > 5")).await.unwrap();
        // Duplicates are kept, not merged
        session.add_breakpoint("main.swift", 42, None).await.unwrap();

        assert_eq!(session.breakpoints.len(), 3);
        assert_eq!(
            session.breakpoints[0],
            Breakpoint { file: "main.swift".to_string(), line: 42, condition: None }
        );
        assert_eq!(
            session.breakpoints[1],
            Breakpoint {
                file: "util.swift".to_string(),
                line: 7,
                condition: Some("x > 5".to_string()),
            }
        );
        assert_eq!(session.breakpoints[2], session.breakpoints[0]);

        session.terminate().await;
    }

    #[tokio::test]
    async fn test_continue_flips_running_flag() {
        let mut session = test_session();
        session.start(&PathBuf::from("/bin/sh")).await.unwrap();

        assert!(!session.running);
        session.continue_execution().await.unwrap();
        assert!(session.running);
        // Second continue takes the resume path
        assert_eq!(session.continue_command(), "continue");

        session.terminate().await;
    }
}
