//! strsync - copy newly added string resources into locale resource files
//!
//! Given a base (default-language) resource file under `res/values/` and its
//! counterpart under `res/values-<locale>/`, strsync appends every entry the
//! locale file is missing, marked as untranslated, without touching the
//! translations already present.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to sync)
//! - [`core`] - Configuration, validated types and path routing
//! - [`resource`] - In-memory resource model with separate parse and write
//! - [`sync`] - Merge planning and atomic replacement of locale files
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. After a sync, the locale key set is a superset of the base key set
//! 2. Existing locale values are never overwritten
//! 3. Appended entries follow the locale's entries, in base order
//! 4. The locale file is only ever replaced by an atomic rename

pub mod cli;
pub mod core;
pub mod resource;
pub mod sync;
pub mod ui;
