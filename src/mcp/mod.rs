//! MCP Server module
//!
//! Provides MCP tools for interacting with Buck2:
//! - `buck2_build` - Build targets
//! - `buck2_test` - Run tests
//! - `buck2_query` - Query the build graph with cquery
//! - `buck2_targets` - List targets matching a pattern
//!
//! And read-only resources:
//! - `buck2-config://` - .buckconfig contents from the working directory
//! - `buck2-root://` - Project root and the BUCK files beneath it

pub mod server;

pub use server::Buck2McpServer;
