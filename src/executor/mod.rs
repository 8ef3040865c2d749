//! Command execution module
//!
//! Provides async subprocess execution with:
//! - Verbatim output capture
//! - Environment variable injection
//! - Working directory control
//! - Opt-in timeout

pub mod runner;

pub use runner::*;
