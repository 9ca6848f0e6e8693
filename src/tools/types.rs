//! Type definitions for LLDB debug MCP tools

use serde::Deserialize;
use schemars::JsonSchema;

// ============================================================================
// start_debug
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct StartDebugArgs {
    /// Executable target to debug (e.g. the Swift package's executable name)
    pub target: String,
    /// Package/project root directory (default: current directory)
    #[serde(default)]
    pub project_root: Option<String>,
    /// Arguments passed to the debuggee when it is launched
    #[serde(default)]
    pub args: Option<Vec<String>>,
    /// Skip the build step and debug the existing binary (default: false)
    #[serde(default)]
    pub skip_build: bool,
}

// ============================================================================
// set_breakpoint
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetBreakpointArgs {
    /// Session ID
    pub session_id: String,
    /// Source file to break in (e.g. "main.swift")
    pub file: String,
    /// Line number (1-based)
    pub line: u32,
    /// Optional condition expression (e.g. "x > 5"), passed verbatim to LLDB
    #[serde(default)]
    pub condition: Option<String>,
}

// ============================================================================
// step
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct StepArgs {
    /// Session ID
    pub session_id: String,
    /// Step kind: "over", "into", or "out" (default: "over")
    #[serde(default = "default_step_kind")]
    pub kind: String,
}

fn default_step_kind() -> String { "over".to_string() }

// ============================================================================
// continue_execution
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ContinueArgs {
    /// Session ID
    pub session_id: String,
}

// ============================================================================
// inspect
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct InspectArgs {
    /// Session ID
    pub session_id: String,
    /// Variable to print. Ignored when an expression is given.
    #[serde(default)]
    pub variable: Option<String>,
    /// Expression to evaluate. Takes precedence over variable.
    #[serde(default)]
    pub expression: Option<String>,
}

// ============================================================================
// debugger_command
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DebuggerCommandArgs {
    /// Session ID
    pub session_id: String,
    /// Raw LLDB command to send (e.g. "bt", "register read")
    pub command: String,
}

// ============================================================================
// list_sessions
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListSessionsArgs {}

// ============================================================================
// terminate_debug
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TerminateDebugArgs {
    /// Session ID to terminate
    pub session_id: String,
}
