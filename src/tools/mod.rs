//! LLDB debug MCP tools module

pub mod debug_tools;
pub mod types;

pub use debug_tools::DebugToolHandler;
pub use types::*;
