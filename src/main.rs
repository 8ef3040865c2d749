//! buck2-mcp CLI entry point
//!
//! Usage:
//!   buck2-mcp mcp                Start MCP server over stdio
//!   buck2-mcp build <targets>    Build targets
//!   buck2-mcp test <targets>     Run tests
//!   buck2-mcp query <expr>       Query the build graph
//!   buck2-mcp targets [pattern]  List targets
//!   buck2-mcp config             Show .buckconfig contents
//!   buck2-mcp root               Show the project root

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use buck2_mcp::buck::{
    build_args, config_snapshot, query_args, root_info, targets_args, test_args, Buck2,
    QueryResult,
};
use buck2_mcp::cli::{
    commands::{BuildArgs, ConfigArgs, OutputFormat, QueryArgs, RootArgs, TargetsArgs, TestArgs},
    run_mcp_server, Cli, Commands,
};
use buck2_mcp::config::load_config;
use buck2_mcp::executor::CommandResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Set up tracing on stderr.
///
/// Stdout is reserved for command output (and for the MCP protocol when
/// serving), so logs must never land there. `BUCK2_MCP_LOG` takes
/// precedence; otherwise `-v` selects debug, default is warn.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env("BUCK2_MCP_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Mcp => {
            run_mcp_server(cli.config.as_deref()).await?;
        }
        Commands::Build(args) => {
            run_build(args, cli.config.as_deref(), cli.verbose).await?;
        }
        Commands::Test(args) => {
            run_test(args, cli.config.as_deref(), cli.verbose).await?;
        }
        Commands::Query(args) => {
            run_query(args, cli.config.as_deref(), cli.verbose).await?;
        }
        Commands::Targets(args) => {
            run_targets(args, cli.config.as_deref(), cli.verbose).await?;
        }
        Commands::Config(args) => {
            show_config(args, cli.config.as_deref())?;
        }
        Commands::Root(args) => {
            show_root(args, cli.config.as_deref()).await?;
        }
    }

    Ok(())
}

/// Build a Buck2 client from config plus per-invocation overrides
fn client_for(
    config_path: Option<&str>,
    dir: Option<&Path>,
    timeout: Option<u64>,
) -> Result<Buck2> {
    let config = load_config(config_path)?;

    let mut client = Buck2::from_config(&config);
    if let Some(dir) = dir {
        client = client.in_dir(dir.to_path_buf());
    }
    if let Some(secs) = timeout {
        client = client.with_timeout_secs(secs);
    }

    Ok(client)
}

/// Build targets
async fn run_build(args: BuildArgs, config_path: Option<&str>, verbose: bool) -> Result<()> {
    let client = client_for(config_path, args.dir.as_deref(), args.timeout)?;

    if verbose {
        eprintln!(
            "{}: {} {}",
            "running".cyan(),
            client.command(),
            build_args(&args.targets).join(" ")
        );
    }

    let result = client.build(&args.targets).await?;
    print_result(&result, &args.format)
}

/// Run tests
async fn run_test(args: TestArgs, config_path: Option<&str>, verbose: bool) -> Result<()> {
    let client = client_for(config_path, args.dir.as_deref(), args.timeout)?;

    if verbose {
        eprintln!(
            "{}: {} {}",
            "running".cyan(),
            client.command(),
            test_args(&args.targets).join(" ")
        );
    }

    let result = client.test(&args.targets).await?;
    print_result(&result, &args.format)
}

/// Query the build graph
async fn run_query(args: QueryArgs, config_path: Option<&str>, verbose: bool) -> Result<()> {
    let client = client_for(config_path, args.dir.as_deref(), args.timeout)?;

    if verbose {
        eprintln!(
            "{}: {} {}",
            "running".cyan(),
            client.command(),
            query_args(&args.query, &args.output_format).join(" ")
        );
    }

    let result = client.query(&args.query, &args.output_format).await?;
    print_query_result(&result, &args.format)
}

/// List targets
async fn run_targets(args: TargetsArgs, config_path: Option<&str>, verbose: bool) -> Result<()> {
    let client = client_for(config_path, args.dir.as_deref(), args.timeout)?;

    if verbose {
        eprintln!(
            "{}: {} {}",
            "running".cyan(),
            client.command(),
            targets_args(&args.pattern).join(" ")
        );
    }

    let result = client.targets(&args.pattern).await?;
    print_result(&result, &args.format)
}

/// Show .buckconfig contents, mirroring the buck2-config:// resource
fn show_config(args: ConfigArgs, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;

    let dir = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    println!("{}", config_snapshot(&dir, &config.buck2.config_files));
    Ok(())
}

/// Show the project root, mirroring the buck2-root:// resource
async fn show_root(args: RootArgs, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;

    let mut client = Buck2::from_config(&config);
    if let Some(dir) = args.dir {
        client = client.in_dir(dir);
    }

    println!("{}", root_info(&client, &config.buck2.build_file).await);
    Ok(())
}

/// Print a command result and fail if buck2 did
fn print_result(result: &CommandResult, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Raw => {
            if !result.stdout.is_empty() {
                print!("{}", result.stdout);
            }
            if !result.stderr.is_empty() {
                eprint!("{}", result.stderr);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    }

    if result.success {
        Ok(())
    } else {
        anyhow::bail!("buck2 exited with code {}", result.exit_code)
    }
}

fn print_query_result(result: &QueryResult, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Raw => {
            if !result.result.stdout.is_empty() {
                print!("{}", result.result.stdout);
            }
            if !result.result.stderr.is_empty() {
                eprint!("{}", result.result.stderr);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    }

    if result.result.success {
        Ok(())
    } else {
        anyhow::bail!("buck2 exited with code {}", result.result.exit_code)
    }
}
