//! MCP Server implementation
//!
//! Implements the MCP tools and resources for buck2-mcp using the rmcp SDK.
//!
//! Every tool returns a pretty-printed JSON string. Results that buck2
//! itself could report (non-zero exits, a missing binary) come back as
//! successful tool calls carrying an unsuccessful payload; only faults
//! outside buck2's reach (spawn failures, timeouts) render as a
//! `ToolError` body. Nothing escapes as a protocol fault.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::model::{
    AnnotateAble, Implementation, ListResourcesResult, PaginatedRequestParam, RawResource,
    ReadResourceRequestParam, ReadResourceResult, Resource, ResourceContents,
    ResourcesCapability, ServerCapabilities, ServerInfo, ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::{tool, Error as McpError, RoleServer, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;

use crate::buck::{config_snapshot, root_info, Buck2, CONFIG_URI, ROOT_URI};
use crate::config::{load_config, Config};
use crate::error::{suggest_fix, Buck2Error};

/// MCP Server for buck2
#[derive(Clone)]
pub struct Buck2McpServer {
    /// Loaded configuration
    config: Arc<RwLock<Config>>,
}

impl Buck2McpServer {
    /// Create a new MCP server
    pub fn new() -> Result<Self, anyhow::Error> {
        let config = load_config(None)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
        })
    }

    /// Create with a specific config
    pub fn with_config(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Reload configuration from disk
    pub async fn reload_config(&self) -> Result<(), anyhow::Error> {
        let config = load_config(None)?;
        let mut cfg = self.config.write().await;
        *cfg = config;
        tracing::info!("Configuration reloaded");
        Ok(())
    }

    /// Build a client from the current configuration
    async fn client(&self) -> Buck2 {
        let config = self.config.read().await;
        Buck2::from_config(&config)
    }
}

impl Default for Buck2McpServer {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

// === Tool Parameter Types ===

/// Parameters for buck2_build tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct BuildParams {
    /// Target patterns to build (e.g., "//...", "//path/to:target")
    pub targets: String,
}

/// Parameters for buck2_test tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TestParams {
    /// Test target patterns (e.g., "//...", "//path/to:test")
    pub targets: String,
}

/// Parameters for buck2_query tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryParams {
    /// Query expression (e.g., "deps(//...)", "kind(rust_binary, //...)")
    pub query: String,

    /// Output format passed to cquery (json, dot, thrift_binary)
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

fn default_output_format() -> String {
    "json".to_string()
}

/// Parameters for buck2_targets tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TargetsParams {
    /// Target pattern to list
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_pattern() -> String {
    "//...".to_string()
}

/// Error response for tools
#[derive(Debug, Serialize)]
struct ToolError {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

impl ToolError {
    fn new(error: impl std::fmt::Display, suggestion: Option<String>) -> String {
        serde_json::to_string_pretty(&ToolError {
            success: false,
            error: error.to_string(),
            suggestion,
        })
        .unwrap_or_else(|_| format!("{{\"success\":false,\"error\":\"{}\"}}", error))
    }

    fn from_error(err: &Buck2Error) -> String {
        let suggestion = match err {
            Buck2Error::SpawnFailed { command, error } => suggest_fix(command, error),
            Buck2Error::Timeout { .. } => Some(
                "Increase [defaults].timeout in the configuration, or set it to 0 to disable."
                    .to_string(),
            ),
        };
        ToolError::new(err, suggestion)
    }
}

// === MCP Tool Implementations ===

#[tool(tool_box)]
impl Buck2McpServer {
    /// Build Buck2 targets
    #[tool(
        description = "Build Buck2 targets. Accepts target patterns like \"//...\" or \"//path/to:target\". Returns captured stdout/stderr and the exit code."
    )]
    pub async fn buck2_build(&self, #[tool(aggr)] params: BuildParams) -> String {
        let client = self.client().await;

        let result = match client.build(&params.targets).await {
            Ok(r) => r,
            Err(e) => return ToolError::from_error(&e),
        };

        serde_json::to_string_pretty(&result)
            .unwrap_or_else(|e| ToolError::new(format!("Serialization error: {}", e), None))
    }

    /// Run Buck2 tests
    #[tool(
        description = "Run Buck2 tests. Accepts test target patterns like \"//...\" or \"//path/to:test\"."
    )]
    pub async fn buck2_test(&self, #[tool(aggr)] params: TestParams) -> String {
        let client = self.client().await;

        let result = match client.test(&params.targets).await {
            Ok(r) => r,
            Err(e) => return ToolError::from_error(&e),
        };

        serde_json::to_string_pretty(&result)
            .unwrap_or_else(|e| ToolError::new(format!("Serialization error: {}", e), None))
    }

    /// Query the Buck2 build graph
    #[tool(
        description = "Query the Buck2 build graph with cquery. Accepts expressions like \"deps(//...)\". With json output the decoded result is attached as parsed_output."
    )]
    pub async fn buck2_query(&self, #[tool(aggr)] params: QueryParams) -> String {
        let client = self.client().await;

        let result = match client.query(&params.query, &params.output_format).await {
            Ok(r) => r,
            Err(e) => return ToolError::from_error(&e),
        };

        serde_json::to_string_pretty(&result)
            .unwrap_or_else(|e| ToolError::new(format!("Serialization error: {}", e), None))
    }

    /// List Buck2 targets matching a pattern
    #[tool(
        description = "List Buck2 targets matching a pattern (default \"//...\"). One target per stdout line."
    )]
    pub async fn buck2_targets(&self, #[tool(aggr)] params: TargetsParams) -> String {
        let client = self.client().await;

        let result = match client.targets(&params.pattern).await {
            Ok(r) => r,
            Err(e) => return ToolError::from_error(&e),
        };

        serde_json::to_string_pretty(&result)
            .unwrap_or_else(|e| ToolError::new(format!("Serialization error: {}", e), None))
    }
}

fn make_resource(uri: &str, name: &str, description: &str) -> Resource {
    let mut resource = RawResource::new(uri, name);
    resource.description = Some(description.to_string());
    resource.mime_type = Some("application/json".to_string());
    resource.no_annotation()
}

#[tool(tool_box)]
impl ServerHandler for Buck2McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: Some(ResourcesCapability {
                    subscribe: None,
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "buck2-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "MCP server exposing Buck2: build and test targets, query the build graph, \
                 and list targets. Results mirror the buck2 CLI with captured stdout/stderr \
                 and the exit code."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: PaginatedRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: vec![
                make_resource(
                    CONFIG_URI,
                    "Buck2 configuration",
                    "Contents of the .buckconfig files in the working directory",
                ),
                make_resource(
                    ROOT_URI,
                    "Buck2 project root",
                    "Project root path and the BUCK files beneath it",
                ),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let config = self.config.read().await;

        match uri.as_str() {
            CONFIG_URI => {
                // A vanished working directory reads the same as missing files
                let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                let text = config_snapshot(&dir, &config.buck2.config_files);
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(text, uri)],
                })
            }
            ROOT_URI => {
                let buck2 = Buck2::from_config(&config);
                let text = root_info(&buck2, &config.buck2.build_file).await;
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(text, uri)],
                })
            }
            _ => Err(McpError::resource_not_found(
                "resource_not_found",
                Some(json!({ "uri": uri })),
            )),
        }
    }
}
