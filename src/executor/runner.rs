//! Async command execution
//!
//! Provides the single subprocess invocation routine every buck2 operation
//! goes through, with:
//! - Output capture (stdout/stderr, verbatim)
//! - Environment variable injection
//! - Working directory control
//! - An opt-in timeout (disabled unless configured)

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::Buck2Error;

/// Options for async command execution
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Working directory for the command (None = inherit)
    pub working_dir: Option<PathBuf>,
    /// Environment variables to set
    pub env: HashMap<String, String>,
    /// Timeout duration (None = no timeout)
    pub timeout: Option<Duration>,
}

impl ExecOptions {
    /// Create options with a working directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
            ..Default::default()
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set timeout in seconds
    pub fn with_timeout_secs(self, secs: u64) -> Self {
        self.with_timeout(Duration::from_secs(secs))
    }

    /// Add an environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// Result of a command invocation
///
/// This is the exact payload the MCP tools serialize. A missing binary is
/// reported here as exit code 127 rather than as an error, so callers always
/// get a structured result for anything the tool itself could have reported.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    /// Whether the command exited with code 0
    pub success: bool,
    /// Captured standard output, verbatim
    pub stdout: String,
    /// Captured standard error, verbatim
    pub stderr: String,
    /// Exit code; 127 when the binary is missing, negative signal number on unix
    pub exit_code: i32,
    /// The full command line, argv joined with spaces
    pub command: String,
}

/// Execute a command asynchronously and capture its output
///
/// # Arguments
/// * `program` - The program to execute
/// * `args` - Command arguments
/// * `options` - Execution options
///
/// # Returns
/// * `Result<CommandResult, Buck2Error>` - Structured result or error
///
/// A non-zero exit is not an error: it comes back as an unsuccessful
/// `CommandResult`. A spawn failure with `ErrorKind::NotFound` is folded
/// into a result with exit code 127 and a stderr message naming the tool.
///
/// # Errors
/// * `Buck2Error::SpawnFailed` - Spawn failed for a reason other than a missing binary
/// * `Buck2Error::Timeout` - The command outlived `options.timeout`
pub async fn exec_command(
    program: &str,
    args: &[&str],
    options: &ExecOptions,
) -> Result<CommandResult, Buck2Error> {
    let command_str = if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    };

    let mut cmd = Command::new(program);
    cmd.args(args);
    // The child must never read the MCP protocol stream
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.kill_on_drop(true); // Kill process if future is dropped

    if let Some(ref dir) = options.working_dir {
        cmd.current_dir(dir);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    tracing::debug!(command = %command_str, "executing");

    let output = if let Some(limit) = options.timeout {
        match timeout(limit, cmd.output()).await {
            Ok(result) => result,
            Err(_) => {
                return Err(Buck2Error::Timeout {
                    command: command_str,
                    timeout_secs: limit.as_secs(),
                });
            }
        }
    } else {
        cmd.output().await
    };

    let output = match output {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(CommandResult {
                success: false,
                stdout: String::new(),
                stderr: format!(
                    "{} command not found. Please ensure Buck2 is installed and in PATH.",
                    program
                ),
                exit_code: 127,
                command: command_str,
            });
        }
        Err(e) => {
            return Err(Buck2Error::SpawnFailed {
                command: command_str,
                error: e.to_string(),
            });
        }
    };

    let exit_code = exit_code_of(&output.status);

    Ok(CommandResult {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code,
        command: command_str,
    })
}

/// Map an exit status to a single integer
///
/// A signal death maps to the negative signal number, matching what a
/// subprocess returncode reports on unix.
#[cfg(unix)]
fn exit_code_of(status: &std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|sig| -sig))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code_of(status: &std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
