//! Buck2 invocation client
//!
//! Thin translation layer over the executor: each operation is a fixed
//! argument template handed to [`exec_command`]. The templates are free
//! functions so the exact argv of every operation can be asserted directly.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::Buck2Error;
use crate::executor::{exec_command, CommandResult, ExecOptions};

/// Arguments for `buck2 build`
pub fn build_args(targets: &str) -> Vec<String> {
    vec!["build".to_string(), targets.to_string()]
}

/// Arguments for `buck2 test`
pub fn test_args(targets: &str) -> Vec<String> {
    vec!["test".to_string(), targets.to_string()]
}

/// Arguments for `buck2 cquery`
pub fn query_args(query: &str, output_format: &str) -> Vec<String> {
    vec![
        "cquery".to_string(),
        query.to_string(),
        "--output-format".to_string(),
        output_format.to_string(),
    ]
}

/// Arguments for `buck2 targets`
pub fn targets_args(pattern: &str) -> Vec<String> {
    vec!["targets".to_string(), pattern.to_string()]
}

/// Arguments for `buck2 root`
pub fn root_args() -> Vec<String> {
    vec!["root".to_string(), "--kind=project".to_string()]
}

/// Result of a query invocation
///
/// Extends [`CommandResult`] with the decoded stdout when the query ran in
/// JSON format and succeeded. The field is omitted from the serialized
/// payload when decoding was not attempted or did not parse.
#[derive(Debug, Serialize)]
pub struct QueryResult {
    #[serde(flatten)]
    pub result: CommandResult,

    /// Decoded stdout for successful JSON-format queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_output: Option<Value>,
}

/// Client for running buck2 commands
#[derive(Debug, Clone)]
pub struct Buck2 {
    /// Binary name or path used to invoke buck2
    command: String,
    /// Execution options applied to every invocation
    options: ExecOptions,
}

impl Buck2 {
    /// Create a client invoking the given binary with default options
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            options: ExecOptions::default(),
        }
    }

    /// Create a client from configuration
    ///
    /// Expands `~` in the configured binary path, injects the configured
    /// environment, and applies the default timeout (0 disables it).
    pub fn from_config(config: &Config) -> Self {
        let command = shellexpand::tilde(&config.buck2.command).into_owned();

        let timeout = if config.defaults.timeout > 0 {
            Some(Duration::from_secs(config.defaults.timeout))
        } else {
            None
        };

        let options = ExecOptions {
            env: config.buck2.env.clone(),
            timeout,
            ..Default::default()
        };

        Self { command, options }
    }

    /// The binary this client invokes
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Override the working directory for invocations
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.working_dir = Some(dir.into());
        self
    }

    /// Override the timeout in seconds (0 disables)
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.options.timeout = if secs > 0 {
            Some(Duration::from_secs(secs))
        } else {
            None
        };
        self
    }

    /// Build targets matching the given patterns
    pub async fn build(&self, targets: &str) -> Result<CommandResult, Buck2Error> {
        self.run(&build_args(targets)).await
    }

    /// Run tests for targets matching the given patterns
    pub async fn test(&self, targets: &str) -> Result<CommandResult, Buck2Error> {
        self.run(&test_args(targets)).await
    }

    /// List targets matching a pattern
    pub async fn targets(&self, pattern: &str) -> Result<CommandResult, Buck2Error> {
        self.run(&targets_args(pattern)).await
    }

    /// Print the project root
    pub async fn root(&self) -> Result<CommandResult, Buck2Error> {
        self.run(&root_args()).await
    }

    /// Query the configured build graph with cquery
    ///
    /// When `output_format` is `json` and the query succeeded, stdout is
    /// decoded into `parsed_output`. A decode failure is tolerated silently;
    /// the raw streams are authoritative either way.
    pub async fn query(
        &self,
        query: &str,
        output_format: &str,
    ) -> Result<QueryResult, Buck2Error> {
        let result = self.run(&query_args(query, output_format)).await?;

        let parsed_output = if output_format == "json" && result.success {
            serde_json::from_str(&result.stdout).ok()
        } else {
            None
        };

        Ok(QueryResult {
            result,
            parsed_output,
        })
    }

    async fn run(&self, args: &[String]) -> Result<CommandResult, Buck2Error> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        exec_command(&self.command, &args, &self.options).await
    }
}
