//! CLI command definitions using clap
//!
//! Defines all CLI subcommands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Buck2 MCP server and command-line wrapper.
///
/// Exposes Buck2 build, test, query, and target listing over the Model
/// Context Protocol for Claude Code, or directly from the command line.
#[derive(Parser, Debug)]
#[command(name = "buck2-mcp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (overrides default XDG paths)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server over stdio (for Claude Code integration)
    Mcp,

    /// Build Buck2 targets
    Build(BuildArgs),

    /// Run Buck2 tests
    Test(TestArgs),

    /// Query the Buck2 build graph with cquery
    Query(QueryArgs),

    /// List Buck2 targets matching a pattern
    Targets(TargetsArgs),

    /// Show the .buckconfig contents seen from a directory
    Config(ConfigArgs),

    /// Show the project root and BUCK files beneath it
    Root(RootArgs),
}

/// Arguments for the `build` subcommand
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Target patterns to build (e.g., "//...", "//path/to:target")
    #[arg(required = true)]
    pub targets: String,

    /// Run buck2 in this directory instead of the current one
    #[arg(short = 'C', long = "dir")]
    pub dir: Option<PathBuf>,

    /// Timeout in seconds (0 for no timeout, overrides config)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "raw")]
    pub format: OutputFormat,
}

/// Arguments for the `test` subcommand
#[derive(Parser, Debug)]
pub struct TestArgs {
    /// Test target patterns (e.g., "//...", "//path/to:test")
    #[arg(required = true)]
    pub targets: String,

    /// Run buck2 in this directory instead of the current one
    #[arg(short = 'C', long = "dir")]
    pub dir: Option<PathBuf>,

    /// Timeout in seconds (0 for no timeout, overrides config)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "raw")]
    pub format: OutputFormat,
}

/// Arguments for the `query` subcommand
#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// Query expression (e.g., "deps(//...)")
    #[arg(required = true)]
    pub query: String,

    /// Output format passed to cquery (json, dot, thrift_binary)
    #[arg(short = 'o', long, default_value = "json")]
    pub output_format: String,

    /// Run buck2 in this directory instead of the current one
    #[arg(short = 'C', long = "dir")]
    pub dir: Option<PathBuf>,

    /// Timeout in seconds (0 for no timeout, overrides config)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "raw")]
    pub format: OutputFormat,
}

/// Arguments for the `targets` subcommand
#[derive(Parser, Debug)]
pub struct TargetsArgs {
    /// Target pattern to list
    #[arg(default_value = "//...")]
    pub pattern: String,

    /// Run buck2 in this directory instead of the current one
    #[arg(short = 'C', long = "dir")]
    pub dir: Option<PathBuf>,

    /// Timeout in seconds (0 for no timeout, overrides config)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "raw")]
    pub format: OutputFormat,
}

/// Arguments for the `config` subcommand
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Directory to read .buckconfig files from (defaults to current directory)
    #[arg(short = 'C', long = "dir")]
    pub dir: Option<PathBuf>,
}

/// Arguments for the `root` subcommand
#[derive(Parser, Debug)]
pub struct RootArgs {
    /// Directory to resolve the project root from (defaults to current directory)
    #[arg(short = 'C', long = "dir")]
    pub dir: Option<PathBuf>,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pass buck2's stdout/stderr straight through
    Raw,
    /// Full result as pretty-printed JSON (what the MCP tools return)
    Json,
}
