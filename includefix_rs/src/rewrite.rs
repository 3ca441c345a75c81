//! File Rewriter.
//!
//! Removes marked lines from a file and aggregates the run-wide deletion
//! histogram. The rewrite is atomic from the caller's viewpoint: retained
//! lines are written byte-identical to a temp file in the same directory,
//! which is then persisted over the original. On any failure the original
//! file is left untouched and the error propagates, aborting the run.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::colors::Painter;
use crate::progress::format_count;
use crate::types::DeletionSet;

/// Write `lines` minus the deletion set back to `path`.
pub fn rewrite_file(path: &Path, lines: &[String], doomed: &DeletionSet) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("cannot open a rewrite target next to {}", path.display()))?;

    for (idx, line) in lines.iter().enumerate() {
        if doomed.contains_key(&idx) {
            continue;
        }
        tmp.write_all(line.as_bytes())
            .with_context(|| format!("cannot write rewrite target for {}", path.display()))?;
    }

    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("cannot replace {}", path.display()))?;
    Ok(())
}

/// Files-by-deletion-count histogram across one run. Every scanned file is
/// recorded, including those with zero deletions, so the bucket counts sum
/// to the number of files scanned.
#[derive(Default)]
pub struct DeletionHistogram {
    buckets: BTreeMap<usize, usize>,
}

impl DeletionHistogram {
    pub fn record(&mut self, deletions: usize) {
        *self.buckets.entry(deletions).or_insert(0) += 1;
    }

    /// (deletion count, file count) pairs, ascending by deletion count.
    pub fn buckets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.buckets.iter().map(|(k, v)| (*k, *v))
    }

    pub fn total_files(&self) -> usize {
        self.buckets.values().sum()
    }

    pub fn render(&self, painter: &Painter) -> String {
        let mut out = String::new();
        out.push_str(&painter.header("Deletions per file:"));
        out.push('\n');
        for (deletions, files) in self.buckets() {
            out.push_str(&format!(
                "  {}: {}\n",
                painter.number(format_count(deletions, "deletion", "deletions")),
                format_count(files, "file", "files"),
            ));
        }
        out
    }
}
