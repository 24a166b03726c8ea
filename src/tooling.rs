//! Tooling & Integration Layer
//!
//! Command-line access to the catalog service.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
