//! Error types for buck2-mcp
//!
//! Provides structured error types with suggestions for common issues.
//!
//! Most buck2 failures are not errors here: a non-zero exit or a missing
//! binary is reported inside a [`CommandResult`](crate::executor::CommandResult)
//! payload. Only faults that prevent producing such a payload (spawn
//! failures, a configured timeout firing) surface as [`Buck2Error`].

use thiserror::Error;

/// Main error type for buck2 operations
#[derive(Error, Debug)]
pub enum Buck2Error {
    /// Failed to start or communicate with the buck2 process
    #[error("Failed to spawn command: {command}")]
    SpawnFailed { command: String, error: String },

    /// Command exceeded the configured timeout
    #[error("Command timed out after {timeout_secs}s: {command}")]
    Timeout { command: String, timeout_secs: u64 },
}

/// Suggest fixes for common error patterns
pub fn suggest_fix(command: &str, stderr: &str) -> Option<String> {
    // Permission errors
    if stderr.contains("Permission denied") {
        return Some(
            "Permission denied. Check that the configured buck2 binary is executable.".to_string(),
        );
    }

    // Spawn-level file errors (a configured path that does not exist)
    if stderr.contains("No such file") {
        return Some(
            "The configured buck2 path does not exist. Check [buck2].command in your config."
                .to_string(),
        );
    }

    // Command not found
    if stderr.contains("command not found") || stderr.contains("not found") {
        return Some(
            "buck2 not found. Install Buck2 and ensure it is in PATH, or set [buck2].command."
                .to_string(),
        );
    }

    // Buck2-specific errors
    if stderr.contains("Unknown target") || stderr.contains("does not exist in package") {
        return Some(
            "Target not found. Run buck2_targets to list the targets the pattern matches."
                .to_string(),
        );
    }

    if stderr.contains("project root") || stderr.contains(".buckconfig") {
        return Some(
            "Not inside a Buck2 project. Run from a directory containing a .buckconfig."
                .to_string(),
        );
    }

    if command.contains("cquery") && stderr.contains("Parse error") {
        return Some(
            "Query expression did not parse. Check the cquery syntax, e.g. deps(\"//...\")."
                .to_string(),
        );
    }

    None
}
