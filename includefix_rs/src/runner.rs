//! Run orchestration: build the two lookup tables, scan every source file,
//! rewrite, report.
//!
//! Both tables are finished before the first file is classified and are
//! passed by reference into the per-file phase as read-only oracles. The
//! scan itself is a single sequential pass; per-file anomalies become
//! warnings, only a failed rewrite aborts the batch.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::json;

use crate::args::ParsedArgs;
use crate::catalog::FrameworkCatalog;
use crate::classify::{Classifier, parse_source};
use crate::colors::Painter;
use crate::config::CleanupConfig;
use crate::fs_utils::gather_files;
use crate::progress::{Spinner, format_count};
use crate::rewrite::{DeletionHistogram, rewrite_file};
use crate::symbols::HeaderSymbolTable;
use crate::types::{
    Classification, DeletionSet, FileReport, OutputMode, RemovedInclude, RunTotals, Warning,
    WarningKind,
};
use crate::usage::any_used;

pub struct RunReport {
    pub totals: RunTotals,
    pub warnings: Vec<Warning>,
    pub histogram: DeletionHistogram,
    pub files: Vec<FileReport>,
    pub headers_indexed: usize,
    pub symbols_indexed: usize,
    pub framework_headers: usize,
}

/// Execute one full cleanup pass over the project root.
pub fn run(parsed: &ParsedArgs) -> Result<RunReport> {
    let painter = Painter::new(parsed.color);
    let quiet = parsed.output == OutputMode::Json;
    let mut warnings: Vec<Warning> = Vec::new();

    let config = match &parsed.config_path {
        Some(path) => CleanupConfig::load_from_path(path, &mut warnings),
        None => CleanupConfig::load(&parsed.root, &mut warnings),
    };

    // phase 1: project header symbol table
    let spinner = (!quiet).then(|| Spinner::new("Indexing project headers…"));
    let mut headers: Vec<PathBuf> = Vec::new();
    gather_files(&parsed.root, &["h"], &mut headers)
        .with_context(|| format!("scanning headers under {}", parsed.root.display()))?;
    let table = HeaderSymbolTable::build(&headers, &config, &mut warnings);
    if let Some(s) = &spinner {
        s.finish_success(&format!(
            "Indexed {} ({})",
            format_count(table.len(), "header", "headers"),
            format_count(table.symbol_count(), "symbol", "symbols"),
        ));
    }

    // phase 2: framework header catalog
    let spinner = (!quiet).then(|| Spinner::new("Indexing framework headers…"));
    if parsed.framework_root.is_none() {
        warnings.push(Warning::new(
            WarningKind::Catalog,
            "no framework include tree given (--qt); framework includes resolve \
             through the allow-list only",
        ));
    }
    let catalog = FrameworkCatalog::build(parsed.framework_root.as_deref(), &config);
    catalog.collisions_with(&table, &mut warnings);
    if let Some(s) = &spinner {
        s.finish_success(&format_count(
            catalog.header_count(),
            "framework header",
            "framework headers",
        ));
    }

    // phase 3: classify, check usage, rewrite
    let classifier = Classifier::new(&table, &catalog, &config)?;
    let mut sources: Vec<PathBuf> = Vec::new();
    gather_files(&parsed.root, &["h", "cpp"], &mut sources)
        .with_context(|| format!("scanning sources under {}", parsed.root.display()))?;

    let spinner = (!quiet).then(|| Spinner::new("Scanning includes…"));
    let mut totals = RunTotals::default();
    let mut histogram = DeletionHistogram::default();
    let mut files: Vec<FileReport> = Vec::new();

    for path in &sources {
        if let Some(s) = &spinner {
            s.set_message(&format!("Scanning {}", path.display()));
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warnings.push(Warning::new(
                    WarningKind::UnreadableFile,
                    format!("cannot read {}: {}", path.display(), e),
                ));
                continue;
            }
        };

        let source = parse_source(path, &content);
        let mut doomed = DeletionSet::new();

        for directive in &source.includes {
            totals.includes_seen += 1;
            match classifier.classify(path, directive) {
                Classification::Skip(_) => {}
                Classification::Unknown => {
                    totals.unknown_includes += 1;
                    warnings.push(Warning::new(
                        WarningKind::UnknownInclude,
                        format!(
                            "unhandled include of '{}' in '{}'",
                            directive.reference,
                            path.display()
                        ),
                    ));
                }
                Classification::Framework { names } | Classification::Internal { names } => {
                    if !any_used(&names, &source.corpus) {
                        doomed.insert(directive.line, directive.raw.clone());
                    }
                }
            }
        }

        totals.files_scanned += 1;
        totals.deletions += doomed.len();
        histogram.record(doomed.len());

        if doomed.is_empty() {
            continue;
        }

        let rewritten = !parsed.dry_run;
        if rewritten {
            rewrite_file(path, &source.lines, &doomed)?;
            totals.files_rewritten += 1;
        }
        files.push(FileReport {
            path: path.display().to_string(),
            removed: doomed
                .iter()
                .map(|(line, text)| RemovedInclude {
                    line: *line,
                    text: text.clone(),
                })
                .collect(),
            rewritten,
        });
    }
    if let Some(s) = &spinner {
        s.finish_success(&format!(
            "Scanned {}, removed {}",
            format_count(totals.files_scanned, "file", "files"),
            format_count(totals.deletions, "include", "includes"),
        ));
    }

    let report = RunReport {
        totals,
        warnings,
        histogram,
        files,
        headers_indexed: table.len(),
        symbols_indexed: table.symbol_count(),
        framework_headers: catalog.header_count(),
    };
    print_report(&report, parsed, &painter);
    Ok(report)
}

fn print_report(report: &RunReport, parsed: &ParsedArgs, painter: &Painter) {
    match parsed.output {
        OutputMode::Json => {
            let histogram: Vec<_> = report
                .histogram
                .buckets()
                .map(|(deletions, files)| json!({ "deletions": deletions, "files": files }))
                .collect();
            let doc = json!({
                "root": parsed.root.display().to_string(),
                "dry_run": parsed.dry_run,
                "headers_indexed": report.headers_indexed,
                "symbols_indexed": report.symbols_indexed,
                "framework_headers": report.framework_headers,
                "totals": report.totals,
                "histogram": histogram,
                "warnings": report.warnings,
                "files": report.files,
            });
            println!("{}", serde_json::to_string_pretty(&doc).unwrap_or_default());
        }
        OutputMode::Human => print_human(report, parsed, painter),
    }
}

fn print_human(report: &RunReport, parsed: &ParsedArgs, painter: &Painter) {
    for warning in &report.warnings {
        println!("{} {}", painter.warn("warning:"), warning.message);
    }
    if !report.warnings.is_empty() {
        println!();
    }

    if parsed.verbose {
        for file in &report.files {
            println!("{}", painter.path(&file.path));
            for removed in &file.removed {
                println!(
                    "  {} {}",
                    painter.dim(&format!("{:>4}", removed.line + 1)),
                    removed.text
                );
            }
        }
        if !report.files.is_empty() {
            println!();
        }
    }

    print!("{}", report.histogram.render(painter));
    println!();

    let action = if parsed.dry_run {
        "Would remove"
    } else {
        "Removed"
    };
    println!(
        "{} {} across {}; {} unclassified.",
        action,
        painter.number(format_count(report.totals.deletions, "include", "includes")),
        format_count(report.files.len(), "file", "files"),
        format_count(report.totals.unknown_includes, "include", "includes"),
    );
}
