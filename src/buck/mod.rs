//! Buck2 operations
//!
//! The [`client::Buck2`] client maps each exposed capability onto a fixed
//! buck2 argument vector; [`resources`] holds the static readers behind the
//! MCP resources.

pub mod client;
pub mod resources;

pub use client::{build_args, query_args, root_args, targets_args, test_args, Buck2, QueryResult};
pub use resources::{config_snapshot, find_build_files, root_info, CONFIG_URI, ROOT_URI};
