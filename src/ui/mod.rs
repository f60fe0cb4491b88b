//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! The library layers never print. Everything the user sees goes through
//! this module so verbosity is handled in one place.

pub mod output;
