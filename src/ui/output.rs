//! ui::output
//!
//! Terminal rendering of sync progress.
//!
//! Per-file summaries go to stdout; `warning:`, `error:` and `[debug]`
//! lines go to stderr. `-q` silences everything except errors. The CLI
//! renders reports at [`Verbosity::Quiet`] under `--json` so stdout carries
//! only the JSON document.

use std::fmt::Display;

use crate::sync::FileReport;

/// How much the CLI prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only (`-q`)
    Quiet,
    /// One summary per file
    Normal,
    /// Summaries plus resolved paths, options and preserved counts (`--debug`)
    Debug,
}

impl Verbosity {
    /// `--quiet` wins over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a line to stdout unless quiet.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a `[debug]` line to stderr under `--debug`.
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an `error:` line to stderr, whatever the verbosity.
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a `warning:` line to stderr unless quiet.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// One line per item, each starting with `prefix`.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format an entry count with the right plural.
pub fn format_count(n: usize) -> String {
    if n == 1 {
        "1 entry".to_string()
    } else {
        format!("{} entries", n)
    }
}

/// One-line summary of a file report.
pub fn format_file_report(report: &FileReport) -> String {
    let locale = report.locale.display();
    if report.is_up_to_date() {
        format!("{}: up to date", locale)
    } else if report.written {
        format!("{}: added {}", locale, format_count(report.added.len()))
    } else {
        format!("{}: would add {}", locale, format_count(report.added.len()))
    }
}

/// Print a file report: the summary line, then the keys involved.
pub fn file_report(report: &FileReport, verbosity: Verbosity) {
    print(format_file_report(report), verbosity);
    if !report.added.is_empty() {
        print(format_list(&report.added, "  + "), verbosity);
    }
    if !report.skipped.is_empty() {
        print(
            format!(
                "  skipped (translatable=\"false\"):\n{}",
                format_list(&report.skipped, "    ")
            ),
            verbosity,
        );
    }
    debug(
        format!(
            "{}: {} preserved from {}",
            report.locale.display(),
            format_count(report.preserved),
            report.base.display()
        ),
        verbosity,
    );
}
