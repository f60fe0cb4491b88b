//! core
//!
//! Configuration, validated types and path routing shared by the CLI and
//! the sync layer.

pub mod config;
pub mod paths;
pub mod types;
