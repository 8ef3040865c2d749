//! Common test utilities for buck2-mcp tests
//!
//! Real buck2 is not assumed to exist on the test machine, so these helpers
//! stand up fake buck2 executables that print canned output.

use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory holding a fake buck2 executable.
///
/// Returns the directory (keep it alive) and the full path to the binary.
pub fn create_fake_buck2(script_body: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let binary_path = dir.path().join("buck2");
    std::fs::write(&binary_path, script_body).expect("Failed to write fake buck2");

    // Make the script executable on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&binary_path)
            .expect("Failed to get metadata")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&binary_path, perms).expect("Failed to set permissions");
    }

    let path = binary_path.clone();
    (dir, path)
}

/// Creates a config file pointing buck2-mcp at the given fake binary.
///
/// Returns the directory (keep it alive) and the path to the config file.
pub fn create_config_for(binary: &std::path::Path) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!("[buck2]\ncommand = \"{}\"\n", binary.display()),
    )
    .expect("Failed to write config");
    let path = config_path.clone();
    (dir, path)
}

/// Fake buck2 that echoes its subcommand and arguments to stdout
pub const ARGV_ECHO_BUCK2: &str = r#"#!/bin/sh
echo "$@"
"#;

/// Fake buck2 that answers cquery with a JSON document
pub const JSON_QUERY_BUCK2: &str = r#"#!/bin/sh
echo '{"//app:main": {"buck.type": "rust_binary"}}'
"#;

/// Fake buck2 that answers cquery with something that is not JSON
pub const PLAINTEXT_QUERY_BUCK2: &str = r#"#!/bin/sh
echo 'not json at all'
"#;

/// Fake buck2 that fails the way a broken build does
pub const FAILING_BUCK2: &str = r#"#!/bin/sh
echo "Action failed: //app:main" >&2
echo "BUILD FAILED" >&2
exit 1
"#;
