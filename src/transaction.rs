//! Command/response transactions over the debugger's REPL stream
//!
//! LLDB speaks a human-oriented prompt-delimited protocol with no message
//! framing, so there is no way to know a response is complete other than
//! waiting. Each transaction writes one command line, sleeps a fixed settle
//! interval, then drains whatever output accumulated and strips prompt and
//! blank lines. A slow command's output may spill into the next transaction;
//! that is an accepted limitation of the protocol, not a bug.

use std::time::Duration;
use tracing::debug;

use crate::error::Result;
use crate::process::ProcessHandle;

/// LLDB's interactive prompt marker, filtered from every response
pub const PROMPT: &str = "(lldb)";

/// Send one command to the debugger and return its filtered response text.
///
/// An empty response is valid — the command produced no visible output.
/// Errors LLDB prints are returned as response text, not as `Err`.
pub async fn send_command(
    handle: &mut ProcessHandle,
    command: &str,
    settle: Duration,
) -> Result<String> {
    debug!("LLDB command: {}", command);

    let mut line = command.as_bytes().to_vec();
    line.push(b'\n');
    handle.write(&line).await?;

    // Settle: give the debugger time to process and print
    tokio::time::sleep(settle).await;

    let bytes = handle.read_available().await;
    let response = filter_response(&String::from_utf8_lossy(&bytes));

    debug!("LLDB response: {}", response);
    Ok(response)
}

/// Strip prompt lines and blank lines from raw debugger output, preserving
/// the order of everything else.
pub fn filter_response(raw: &str) -> String {
    raw.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && trimmed != PROMPT
        })
        .collect::<Vec<_>>()
        .join("\n")
}
