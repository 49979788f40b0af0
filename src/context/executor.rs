// Runs the one action the user picked
//
// The command string is split on whitespace and spawned directly, no shell.
// The child inherits stdin, stdout and stderr.

use crate::error::{AuraError, Result};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Split a command line on whitespace
pub fn tokenize(command: &str) -> Result<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next().ok_or(AuraError::EmptyCommand)?;
    Ok((program, parts.collect()))
}

/// Spawn `command` and wait for it to finish
///
/// # Returns
/// * `Ok(ExitStatus)` - The child ran; its status is passed through
/// * `Err(AuraError::EmptyCommand)` - Nothing to run
/// * `Err(AuraError::Io)` - The program could not be started
pub async fn execute(command: &str) -> Result<ExitStatus> {
    let (program, args) = tokenize(command)?;
    debug!(program = %program, args = ?args, "executing action");

    let status = Command::new(&program)
        .args(&args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await?;

    Ok(status)
}
