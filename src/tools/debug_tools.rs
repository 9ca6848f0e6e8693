//! RMCP 0.3.2 implementation for LLDB debug MCP tools
//!
//! Each tool translates a structured request into one or more LLDB REPL
//! transactions against a registered session.

use rmcp::{
    tool, tool_router, tool_handler, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::*,
    ErrorData as McpError,
};
use tracing::{info, warn};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::types::*;
use crate::config::Config;
use crate::error::DebugError;
use crate::registry::SessionRegistry;
use crate::runner;
use crate::session::DebugSession;

/// LLDB debug tool handler
#[derive(Clone)]
pub struct DebugToolHandler {
    #[allow(dead_code)]
    tool_router: ToolRouter<DebugToolHandler>,
    config: Config,
    registry: SessionRegistry,
}

impl DebugToolHandler {
    pub fn new(config: Config) -> Self {
        Self::with_registry(config, SessionRegistry::new())
    }

    /// Construct with an externally owned registry (shared or test-provided)
    pub fn with_registry(config: Config, registry: SessionRegistry) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config,
            registry,
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Get a session by ID, returning an MCP error if not found
    async fn get_session(&self, session_id: &str) -> Result<Arc<Mutex<DebugSession>>, McpError> {
        self.registry.get(session_id).await.ok_or_else(|| {
            McpError::invalid_params(format!("Session not found: {}", session_id), None)
        })
    }
}

/// Map structural errors to the MCP error taxonomy: bad caller input vs
/// process/pipe failure
fn to_mcp_error(err: DebugError) -> McpError {
    if err.is_invalid_input() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

#[tool_router]
impl DebugToolHandler {
    // =========================================================================
    // Session Management (3 tools)
    // =========================================================================

    #[tool(description = "Build a target and start an LLDB debug session for it. Returns session_id for use with other tools.")]
    async fn start_debug(&self, Parameters(args): Parameters<StartDebugArgs>) -> Result<CallToolResult, McpError> {
        let lldb_path = self
            .config
            .find_lldb()
            .map_err(|e| to_mcp_error(DebugError::LldbNotFound(e)))?;

        let project_root = PathBuf::from(args.project_root.as_deref().unwrap_or("."));
        let launch_args = args.args.unwrap_or_default();

        // Resolve the debuggee first; a failed build never creates a session
        if !args.skip_build {
            let build = runner::build_package(&project_root).await.map_err(to_mcp_error)?;
            if !build.success {
                return Err(McpError::internal_error(
                    format!("Build failed (exit {}):\n{}", build.exit_code, build.combined_output()),
                    None,
                ));
            }
        }
        let executable = runner::debug_binary_path(&project_root, &args.target);

        let session_id = uuid::Uuid::new_v4().to_string();
        info!("Starting debug session {} for target '{}'", session_id, args.target);

        let session = DebugSession::new(
            session_id.clone(),
            args.target.clone(),
            project_root,
            launch_args,
            self.config.settle_interval,
            self.config.startup_grace,
        );
        let handle = self.registry.insert(session).await;

        // Spawn lldb and point it at the binary. Any failure past this point
        // evicts the entry so no dangling session remains.
        let target_response = {
            let mut session = handle.lock().await;
            let started = session.start(&lldb_path).await;
            match started {
                Ok(()) => session.create_target(&executable).await,
                Err(e) => Err(e),
            }
        };

        let target_response = match target_response {
            Ok(text) => text,
            Err(e) => {
                self.registry.remove(&session_id).await;
                let mut session = handle.lock().await;
                session.terminate().await;
                return Err(to_mcp_error(e));
            }
        };

        let message = format!(
            "Debug session started\n\
             Session ID: {}\n\
             Target: {}\n\
             Executable: {}\n\
             LLDB: {}\n\
             {}",
            session_id,
            args.target,
            executable.display(),
            lldb_path.display(),
            target_response,
        );

        info!("Session {} created", session_id);
        Ok(CallToolResult::success(vec![Content::text(message)]))
    }

    #[tool(description = "List active debug sessions")]
    async fn list_sessions(&self, Parameters(_args): Parameters<ListSessionsArgs>) -> Result<CallToolResult, McpError> {
        let summaries = self.registry.list().await;

        let message = if summaries.is_empty() {
            "No active debug sessions".to_string()
        } else {
            let mut out = format!("{} active session(s):\n", summaries.len());
            for s in summaries {
                out.push_str(&format!(
                    "- {} target={} running={} breakpoints={}\n",
                    s.session_id, s.target, s.running, s.breakpoint_count
                ));
            }
            out
        };

        Ok(CallToolResult::success(vec![Content::text(message)]))
    }

    #[tool(description = "Quit LLDB and release the debug session")]
    async fn terminate_debug(&self, Parameters(args): Parameters<TerminateDebugArgs>) -> Result<CallToolResult, McpError> {
        let session = self.registry.remove(&args.session_id).await;

        match session {
            Some(session) => {
                let mut session = session.lock().await;
                session.terminate().await;
                info!("Session {} terminated", args.session_id);
                Ok(CallToolResult::success(vec![Content::text(format!(
                    "Session {} terminated", args.session_id
                ))]))
            }
            None => Err(McpError::invalid_params(
                format!("Session not found: {}", args.session_id),
                None,
            )),
        }
    }

    // =========================================================================
    // Execution Control (3 tools)
    // =========================================================================

    #[tool(description = "Set a breakpoint at a file and line, with an optional condition expression")]
    async fn set_breakpoint(&self, Parameters(args): Parameters<SetBreakpointArgs>) -> Result<CallToolResult, McpError> {
        if args.line == 0 {
            return Err(to_mcp_error(DebugError::InvalidInput(
                "line number must be positive".to_string(),
            )));
        }

        let session = self.get_session(&args.session_id).await?;
        let mut session = session.lock().await;

        let response = session
            .add_breakpoint(&args.file, args.line, args.condition.as_deref())
            .await
            .map_err(to_mcp_error)?;

        info!("Breakpoint set at {}:{} in session {}", args.file, args.line, args.session_id);
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Breakpoint set at {}:{}\n{}", args.file, args.line, response
        ))]))
    }

    #[tool(description = "Step the debuggee: kind is \"over\" (next line), \"into\" (enter calls), or \"out\" (finish frame)")]
    async fn step(&self, Parameters(args): Parameters<StepArgs>) -> Result<CallToolResult, McpError> {
        let session = self.get_session(&args.session_id).await?;
        let mut session = session.lock().await;

        let response = session.step(&args.kind).await.map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Step ({})\n{}", args.kind, response
        ))]))
    }

    #[tool(description = "Launch the debuggee (first call) or continue it until the next stop")]
    async fn continue_execution(&self, Parameters(args): Parameters<ContinueArgs>) -> Result<CallToolResult, McpError> {
        let session = self.get_session(&args.session_id).await?;
        let mut session = session.lock().await;

        let command = session.continue_command();
        let response = session.continue_execution().await.map_err(to_mcp_error)?;

        info!("Session {}: {}", args.session_id, command);
        Ok(CallToolResult::success(vec![Content::text(format!(
            "{}\n{}", command, response
        ))]))
    }

    // =========================================================================
    // Inspection (2 tools)
    // =========================================================================

    #[tool(description = "Inspect program state: evaluate an expression, print a variable, or list all frame locals")]
    async fn inspect(&self, Parameters(args): Parameters<InspectArgs>) -> Result<CallToolResult, McpError> {
        let session = self.get_session(&args.session_id).await?;
        let mut session = session.lock().await;

        let response = session
            .inspect(args.variable.as_deref(), args.expression.as_deref())
            .await
            .map_err(to_mcp_error)?;

        let message = if response.is_empty() {
            "(no output)".to_string()
        } else {
            response
        };
        Ok(CallToolResult::success(vec![Content::text(message)]))
    }

    #[tool(description = "Send a raw LLDB command to the session and return its output")]
    async fn debugger_command(&self, Parameters(args): Parameters<DebuggerCommandArgs>) -> Result<CallToolResult, McpError> {
        if args.command.trim().is_empty() {
            return Err(to_mcp_error(DebugError::InvalidInput(
                "command must not be empty".to_string(),
            )));
        }

        let session = self.get_session(&args.session_id).await?;
        let mut session = session.lock().await;

        let response = session.send_command(&args.command).await.map_err(|e| {
            warn!("Command failed in session {}: {}", args.session_id, e);
            to_mcp_error(e)
        })?;

        let message = if response.is_empty() {
            format!("{}\n(no output)", args.command)
        } else {
            format!("{}\n{}", args.command, response)
        };
        Ok(CallToolResult::success(vec![Content::text(message)]))
    }
}

#[tool_handler]
impl ServerHandler for DebugToolHandler {}
