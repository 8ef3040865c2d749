//! buck2-mcp - Buck2 MCP Server
//!
//! Wraps the Buck2 build system for Claude Code and other MCP clients.
//! Every buck2 invocation comes back as a structured result carrying the
//! captured stdout/stderr, the exit code, and the command line that ran,
//! whether buck2 succeeded or not.
//!
//! ## Features
//!
//! - Build, test, query, and target listing over MCP or the CLI
//! - Results mirror the buck2 CLI, including failures
//! - XDG-compliant layered configuration
//! - Configurable buck2 binary, environment, and optional timeout
//!
//! ## MCP Tools
//!
//! - `buck2_build` - Build targets
//! - `buck2_test` - Run tests
//! - `buck2_query` - Query the build graph with cquery
//! - `buck2_targets` - List targets matching a pattern
//!
//! ## MCP Resources
//!
//! - `buck2-config://` - .buckconfig contents from the working directory
//! - `buck2-root://` - Project root and the BUCK files beneath it

pub mod buck;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod mcp;

pub use buck::{Buck2, QueryResult};
pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::Buck2Error;
pub use executor::{exec_command, CommandResult, ExecOptions};
pub use mcp::Buck2McpServer;
