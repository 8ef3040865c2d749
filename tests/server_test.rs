//! Integration tests for the MCP server tools
//!
//! The tool methods are called directly on the server. Fake buck2
//! executables from `common` stand in for the real binary.

mod common;

use buck2_mcp::config::{load_config, Config};
use buck2_mcp::mcp::server::{BuildParams, QueryParams, TargetsParams, TestParams};
use buck2_mcp::Buck2McpServer;

use common::{
    create_config_for, create_fake_buck2, ARGV_ECHO_BUCK2, FAILING_BUCK2, JSON_QUERY_BUCK2,
    PLAINTEXT_QUERY_BUCK2,
};

fn server_with_command(command: &str) -> Buck2McpServer {
    let mut config = Config::default();
    config.buck2.command = command.to_string();
    Buck2McpServer::with_config(config)
}

#[tokio::test]
async fn build_runs_fake_buck2() {
    let (_dir, binary) = create_fake_buck2(ARGV_ECHO_BUCK2);
    let server = server_with_command(&binary.display().to_string());

    let response = server
        .buck2_build(BuildParams {
            targets: "//demo:app".to_string(),
        })
        .await;

    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["exit_code"], 0);
    assert_eq!(value["stdout"], "build //demo:app\n");
    assert_eq!(
        value["command"],
        format!("{} build //demo:app", binary.display())
    );
}

#[tokio::test]
async fn test_tool_passes_test_subcommand() {
    let (_dir, binary) = create_fake_buck2(ARGV_ECHO_BUCK2);
    let server = server_with_command(&binary.display().to_string());

    let response = server
        .buck2_test(TestParams {
            targets: "//...".to_string(),
        })
        .await;

    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(value["stdout"], "test //...\n");
}

#[tokio::test]
async fn targets_uses_pattern() {
    let (_dir, binary) = create_fake_buck2(ARGV_ECHO_BUCK2);
    let server = server_with_command(&binary.display().to_string());

    let response = server
        .buck2_targets(TargetsParams {
            pattern: "//services/...".to_string(),
        })
        .await;

    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(value["stdout"], "targets //services/...\n");
}

#[tokio::test]
async fn query_attaches_parsed_output_for_json() {
    let (_dir, binary) = create_fake_buck2(JSON_QUERY_BUCK2);
    let server = server_with_command(&binary.display().to_string());

    let response = server
        .buck2_query(QueryParams {
            query: "deps(//app:main)".to_string(),
            output_format: "json".to_string(),
        })
        .await;

    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(
        value["parsed_output"]["//app:main"]["buck.type"],
        "rust_binary"
    );
}

#[tokio::test]
async fn query_tolerates_unparseable_stdout() {
    let (_dir, binary) = create_fake_buck2(PLAINTEXT_QUERY_BUCK2);
    let server = server_with_command(&binary.display().to_string());

    let response = server
        .buck2_query(QueryParams {
            query: "deps(//...)".to_string(),
            output_format: "json".to_string(),
        })
        .await;

    // Still a successful payload, just without parsed_output
    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["stdout"], "not json at all\n");
    assert!(value.get("parsed_output").is_none());
}

#[tokio::test]
async fn query_skips_parsing_for_dot_format() {
    let (_dir, binary) = create_fake_buck2(ARGV_ECHO_BUCK2);
    let server = server_with_command(&binary.display().to_string());

    let response = server
        .buck2_query(QueryParams {
            query: "deps(//...)".to_string(),
            output_format: "dot".to_string(),
        })
        .await;

    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(value["stdout"], "cquery deps(//...) --output-format dot\n");
    assert!(value.get("parsed_output").is_none());
}

#[tokio::test]
async fn failed_build_is_successful_tool_call() {
    let (_dir, binary) = create_fake_buck2(FAILING_BUCK2);
    let server = server_with_command(&binary.display().to_string());

    let response = server
        .buck2_build(BuildParams {
            targets: "//app:main".to_string(),
        })
        .await;

    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["exit_code"], 1);
    assert!(value["stderr"]
        .as_str()
        .unwrap()
        .contains("Action failed: //app:main"));
    assert!(value["stderr"].as_str().unwrap().contains("BUILD FAILED"));
}

#[tokio::test]
async fn missing_binary_reports_127() {
    let server = server_with_command("buck2_that_does_not_exist_anywhere");

    let response = server
        .buck2_build(BuildParams {
            targets: "//...".to_string(),
        })
        .await;

    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["exit_code"], 127);
    assert!(value["stderr"].as_str().unwrap().contains(
        "buck2_that_does_not_exist_anywhere command not found. \
         Please ensure Buck2 is installed and in PATH."
    ));
}

#[tokio::test]
async fn config_env_reaches_buck2() {
    let (_dir, binary) = create_fake_buck2(
        r#"#!/bin/sh
echo "cell=$BUCK2_TEST_CELL"
"#,
    );

    let mut config = Config::default();
    config.buck2.command = binary.display().to_string();
    config
        .buck2
        .env
        .insert("BUCK2_TEST_CELL".to_string(), "fbcode".to_string());
    let server = Buck2McpServer::with_config(config);

    let response = server
        .buck2_targets(TargetsParams {
            pattern: "//...".to_string(),
        })
        .await;

    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(value["stdout"], "cell=fbcode\n");
}

#[tokio::test]
async fn configured_timeout_produces_tool_error() {
    let (_dir, binary) = create_fake_buck2(
        r#"#!/bin/sh
sleep 3
"#,
    );

    let mut config = Config::default();
    config.buck2.command = binary.display().to_string();
    config.defaults.timeout = 1;
    let server = Buck2McpServer::with_config(config);

    let response = server
        .buck2_build(BuildParams {
            targets: "//...".to_string(),
        })
        .await;

    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(value["success"], false);
    assert!(value["error"].as_str().unwrap().contains("timed out"));
    assert!(value["suggestion"].as_str().unwrap().contains("timeout"));
}

#[tokio::test]
async fn concurrent_tools_keep_results_separate() {
    let (_dir, binary) = create_fake_buck2(ARGV_ECHO_BUCK2);
    let server = server_with_command(&binary.display().to_string());

    let (a, b) = tokio::join!(
        server.buck2_build(BuildParams {
            targets: "//app:one".to_string(),
        }),
        server.buck2_build(BuildParams {
            targets: "//app:two".to_string(),
        }),
    );

    let a: serde_json::Value = serde_json::from_str(&a).unwrap();
    let b: serde_json::Value = serde_json::from_str(&b).unwrap();
    assert_eq!(a["stdout"], "build //app:one\n");
    assert_eq!(b["stdout"], "build //app:two\n");
}

#[tokio::test]
async fn server_from_config_file() {
    let (_bin_dir, binary) = create_fake_buck2(ARGV_ECHO_BUCK2);
    let (_cfg_dir, config_path) = create_config_for(&binary);

    let config = load_config(Some(config_path.to_str().unwrap())).unwrap();
    let server = Buck2McpServer::with_config(config);

    let response = server
        .buck2_build(BuildParams {
            targets: "//...".to_string(),
        })
        .await;

    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["stdout"], "build //...\n");
}
