//! # includefix
//!
//! Static analysis and automated refactoring for C++/Qt codebases: scans a
//! project's header and source files, builds a symbol table of the types
//! each header declares, classifies every `#include` directive by origin
//! (project, framework, standard library, vendored, exempt), checks whether
//! any symbol tied to the include is referenced in the rest of the file, and
//! removes directives that are structurally unnecessary — rewriting files in
//! place, one atomic replacement per file.
//!
//! There is no compiler front end behind this: declarations are recognized
//! by an ordered list of lexical rules, and usage is a case-insensitive
//! substring check over the include-stripped file body. Both choices are
//! deliberately conservative; an include is only removed when nothing in the
//! file could possibly refer to it, and anything unclassifiable is reported
//! and kept.
//!
//! ## Library usage
//!
//! ```rust,no_run
//! use includefix::{args, runner};
//! use std::path::PathBuf;
//!
//! let mut parsed = args::ParsedArgs::default();
//! parsed.root = PathBuf::from("src");
//! parsed.framework_root = Some(PathBuf::from("/opt/qt/include"));
//! parsed.dry_run = true;
//!
//! let report = runner::run(&parsed).unwrap();
//! println!("{} deletions", report.totals.deletions);
//! ```
//!
//! ## CLI usage
//!
//! ```bash
//! incfix src --qt /opt/qt/include          # clean up in place
//! incfix src --qt /opt/qt/include -n       # report only
//! incfix --json                            # machine-readable report
//! ```

/// Command-line argument parsing.
pub mod args;

/// Framework Header Catalog: the external UI framework's header namespace.
pub mod catalog;

/// Include Classifier: origin resolution and skip rules for one directive.
pub mod classify;

/// Terminal color utilities.
pub mod colors;

/// Curated allow-lists and overrides, loaded from `.incfix/config.toml`.
pub mod config;

/// Filesystem helpers.
pub mod fs_utils;

/// Progress UI (spinners, status messages).
pub mod progress;

/// File Rewriter and the run-wide deletion histogram.
pub mod rewrite;

/// Run orchestration and reporting.
pub mod runner;

/// Header Symbol Extractor: per-header declared symbol tables.
pub mod symbols;

/// Shared data model.
pub mod types;

/// Usage Checker: lexical symbol-reference detection.
pub mod usage;
