//! CLI module for buck2-mcp
//!
//! Provides command-line interface with the following subcommands:
//! - `mcp` - Start MCP server over stdio
//! - `build` - Build targets
//! - `test` - Run tests
//! - `query` - Query the build graph
//! - `targets` - List targets
//! - `config` - Show .buckconfig contents
//! - `root` - Show the project root

pub mod commands;
pub mod mcp;

pub use commands::{Cli, Commands};
pub use mcp::run_mcp_server;
