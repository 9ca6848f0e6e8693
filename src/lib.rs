//! LLDB Debug MCP Server
//!
//! A Model Context Protocol server that drives interactive LLDB sessions over
//! stdio pipes, exposing breakpoints, stepping, and state inspection as
//! discrete request/response tools.

pub mod config;
pub mod error;
pub mod process;
pub mod registry;
pub mod runner;
pub mod session;
pub mod tools;
pub mod transaction;

pub use config::{Args, Config};
pub use error::{DebugError, Result};
pub use registry::SessionRegistry;
pub use session::{Breakpoint, DebugSession};
pub use tools::DebugToolHandler;
