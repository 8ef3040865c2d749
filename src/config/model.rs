//! Configuration model for buck2-mcp
//!
//! Defines the structure for XDG-compliant layered configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Buck2 invocation settings
    #[serde(default)]
    pub buck2: Buck2Config,

    /// Default execution settings
    #[serde(default)]
    pub defaults: Defaults,
}

/// Buck2 invocation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Buck2Config {
    /// Binary name or path used to invoke buck2 (`~` is expanded)
    #[serde(default = "default_command")]
    pub command: String,

    /// Config file names surfaced by the buck2-config:// resource
    #[serde(default = "default_config_files")]
    pub config_files: Vec<String>,

    /// Build file name enumerated by the buck2-root:// resource
    #[serde(default = "default_build_file")]
    pub build_file: String,

    /// Extra environment variables for every invocation
    #[serde(default)]
    pub env: HashMap<String, String>,
}

fn default_command() -> String {
    "buck2".to_string()
}

fn default_config_files() -> Vec<String> {
    vec![".buckconfig".to_string(), ".buckconfig.local".to_string()]
}

fn default_build_file() -> String {
    "BUCK".to_string()
}

impl Default for Buck2Config {
    fn default() -> Self {
        Self {
            command: default_command(),
            config_files: default_config_files(),
            build_file: default_build_file(),
            env: HashMap::new(),
        }
    }
}

/// Default execution settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    /// Timeout in seconds applied to every invocation (0 disables)
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    0
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}
