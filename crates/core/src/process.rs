//! Process execution utilities
//!
//! Runs external commands (for example `xcode-select`) with captured output
//! and reports failures through the crate error type.

use crate::error::{Error, Result};
use std::process::{Command, Output, Stdio};

/// Result of a command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Exit code of the command, -1 when terminated by a signal
    pub exit_code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandResult {
    /// Create from std::process::Output
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Run a command and capture output
pub fn run_command(program: &str, args: &[&str]) -> Result<CommandResult> {
    tracing::debug!(program, ?args, "running command");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::command_not_found(program).with_source(e)
            } else {
                Error::process(format!("Failed to execute {}: {}", program, e)).with_source(e)
            }
        })?;

    let result = CommandResult::from_output(output);
    tracing::debug!(program, exit_code = result.exit_code, "command finished");
    Ok(result)
}

/// Run a command given as a full argv vector (`["sudo", "xcode-select", "-s"]`)
/// with extra trailing arguments
pub fn run_argv(argv: &[String], extra: &[&str]) -> Result<CommandResult> {
    let (program, rest) = argv
        .split_first()
        .ok_or_else(|| Error::config("Command line is empty"))?;
    let mut args: Vec<&str> = rest.iter().map(String::as_str).collect();
    args.extend_from_slice(extra);
    run_command(program, &args)
}

/// Check if a command exists in PATH
pub fn command_exists(program: &str) -> bool {
    which::which(program).is_ok()
}
