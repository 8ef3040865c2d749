//! Static resource readers
//!
//! Backs the `buck2-config://` and `buck2-root://` MCP resources. Both
//! readers return pretty-printed JSON text and fold every failure into the
//! payload itself; they never return an error to the protocol layer.

use std::path::Path;

use serde_json::{json, Map, Value};
use walkdir::{DirEntry, WalkDir};

use crate::buck::Buck2;

/// URI of the configuration snapshot resource
pub const CONFIG_URI: &str = "buck2-config://";

/// URI of the project root resource
pub const ROOT_URI: &str = "buck2-root://";

/// Render the contents of the Buck2 config files in `dir` as JSON
///
/// Each configured file name maps to its full text. A missing file maps to
/// the literal `"File not found"`; an unreadable file maps to a message
/// embedding the read error.
pub fn config_snapshot(dir: &Path, config_files: &[String]) -> String {
    let mut content = Map::new();

    for name in config_files {
        let path = dir.join(name);
        let value = if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => format!("Error reading {}: {}", name, e),
            }
        } else {
            "File not found".to_string()
        };
        content.insert(name.clone(), Value::String(value));
    }

    to_pretty(&Value::Object(content))
}

/// Render project root information as JSON
///
/// Runs `buck2 root --kind=project`. On success the payload carries the
/// trimmed root path and the build files beneath it; any failure becomes an
/// `{"error": ...}` payload instead.
pub async fn root_info(buck2: &Buck2, build_file: &str) -> String {
    match buck2.root().await {
        Ok(result) if result.success => render_root(result.stdout.trim(), build_file),
        Ok(result) => to_pretty(&json!({ "error": result.stderr })),
        Err(e) => to_pretty(&json!({ "error": e.to_string() })),
    }
}

/// Pure renderer for the root payload, split out for tests
fn render_root(root: &str, build_file: &str) -> String {
    let root_path = Path::new(root);
    let buck_files = if root_path.exists() {
        find_build_files(root_path, build_file)
    } else {
        Vec::new()
    };

    to_pretty(&json!({
        "project_root": root,
        "buck_files": buck_files,
    }))
}

/// Enumerate build files under `root`, best effort
///
/// Hidden directories are skipped and unreadable entries are ignored.
pub fn find_build_files(root: &Path, build_file: &str) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.file_name() == std::ffi::OsStr::new(build_file)
        })
        .map(|entry| entry.path().display().to_string())
        .collect();

    files.sort();
    files
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn to_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}
