//! Configuration for the lldb-debug MCP server

use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lldb-debug")]
#[command(about = "MCP server for interactive debugging via LLDB")]
#[command(version)]
pub struct Args {
    /// Path to lldb binary (defaults to searching PATH)
    #[arg(long)]
    pub lldb_path: Option<PathBuf>,

    /// Settle interval in milliseconds: how long to wait after sending a
    /// command before draining LLDB's output
    #[arg(long, default_value_t = 500)]
    pub settle_ms: u64,

    /// Startup grace period in milliseconds: how long to wait after spawning
    /// LLDB before it is considered ready for commands
    #[arg(long, default_value_t = 1000)]
    pub startup_grace_ms: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log file path (defaults to stderr)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to lldb binary
    pub lldb_path: Option<PathBuf>,
    /// Wait after each command before draining output
    pub settle_interval: Duration,
    /// Wait after spawning lldb before sending the first command
    pub startup_grace: Duration,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        Self {
            lldb_path: args.lldb_path.clone(),
            settle_interval: Duration::from_millis(args.settle_ms),
            startup_grace: Duration::from_millis(args.startup_grace_ms),
        }
    }

    /// Find lldb binary path: config, then PATH
    pub fn find_lldb(&self) -> Result<PathBuf, String> {
        if let Some(path) = &self.lldb_path {
            if path.exists() {
                return Ok(path.clone());
            }
            return Err(format!("Configured lldb path does not exist: {}", path.display()));
        }

        // Search PATH
        which("lldb").map_err(|_| {
            "lldb not found. Install Xcode command line tools or an LLVM toolchain.".to_string()
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lldb_path: None,
            settle_interval: Duration::from_millis(500),
            startup_grace: Duration::from_millis(1000),
        }
    }
}

/// Find an executable on PATH (simple which implementation)
fn which(name: &str) -> Result<PathBuf, ()> {
    if let Ok(path_var) = std::env::var("PATH") {
        for dir in path_var.split(':') {
            let candidate = PathBuf::from(dir).join(name);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }
    Err(())
}
