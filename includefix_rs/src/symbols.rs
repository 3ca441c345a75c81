//! Header Symbol Extractor.
//!
//! Scans project headers and records which type names each one declares,
//! using an ordered list of lexical declaration rules instead of a parser.
//! The rules only look at whitespace-normalized tokens, which is enough for
//! the `class`/`struct`/`enum`/alias forms that matter here; templates,
//! macros and preprocessor conditionals are out of scope by design.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CleanupConfig;
use crate::types::{Warning, WarningKind};

/// Immutable lookup tables produced by the header scan: base name -> declared
/// symbols, plus base name -> every path sharing that base name.
pub struct HeaderSymbolTable {
    symbols: BTreeMap<String, Vec<String>>,
    paths: BTreeMap<String, Vec<PathBuf>>,
}

type ExtractFn = fn(&[&str]) -> Option<String>;

/// One declaration-recognizer rule: a leading keyword sequence and the token
/// extractor applied when a line starts with it. Rules are tried in order and
/// the first match wins, so `enum class` must precede `enum`.
struct DeclRule {
    keywords: &'static [&'static str],
    extract: ExtractFn,
}

const RULES: &[DeclRule] = &[
    DeclRule {
        keywords: &["enum", "class"],
        extract: extract_third,
    },
    DeclRule {
        keywords: &["enum"],
        extract: extract_second,
    },
    DeclRule {
        keywords: &["class"],
        extract: extract_class,
    },
    DeclRule {
        keywords: &["struct"],
        extract: extract_second,
    },
    DeclRule {
        keywords: &["using"],
        extract: extract_using,
    },
    DeclRule {
        keywords: &["typedef"],
        extract: extract_typedef,
    },
];

fn extract_second(parts: &[&str]) -> Option<String> {
    parts.get(1).and_then(|t| clean_identifier(t))
}

fn extract_third(parts: &[&str]) -> Option<String> {
    parts.get(2).and_then(|t| clean_identifier(t))
}

fn extract_class(parts: &[&str]) -> Option<String> {
    let token = parts.get(1)?;
    // `class Foo;` is a forward declaration, not a definition
    if token.ends_with(';') {
        return None;
    }
    clean_identifier(token)
}

fn extract_using(parts: &[&str]) -> Option<String> {
    // only `using Name = ...` aliases; `using namespace x` declares nothing
    if parts.get(2).copied() != Some("=") {
        return None;
    }
    parts.get(1).and_then(|t| clean_identifier(t))
}

fn extract_typedef(parts: &[&str]) -> Option<String> {
    if parts.len() < 3 {
        return None;
    }
    let last = parts.last()?;
    if !last.ends_with(';') {
        return None;
    }
    clean_identifier(last)
}

/// Strips a trailing terminator and rejects anything that is not a plain
/// identifier (anonymous enums, function-pointer typedefs, macro soup).
fn clean_identifier(token: &str) -> Option<String> {
    let token = token.trim_end_matches(';');
    if token.is_empty() {
        return None;
    }
    let mut chars = token.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some(token.to_string())
}

/// Strip export macros, pad structural punctuation so it tokenizes apart
/// from names, collapse whitespace.
fn normalize_line(line: &str, export_macros: &[String]) -> String {
    let mut out = line.to_string();
    for token in export_macros {
        out = out.replace(token.as_str(), "");
    }
    out = out.replace(':', ": ").replace('{', " { ");
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Apply the rule list to one normalized line.
fn extract_symbol(line: &str) -> Option<String> {
    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() < 2 {
        return None;
    }
    for rule in RULES {
        let n = rule.keywords.len();
        if parts.len() > n && parts[..n] == *rule.keywords {
            return (rule.extract)(&parts);
        }
    }
    None
}

fn base_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    name.strip_suffix(".h").unwrap_or(&name).to_string()
}

impl HeaderSymbolTable {
    /// Scan every header once and build the lookup tables. Headers that
    /// cannot be read and headers with no recognized declaration are
    /// warnings, never errors.
    pub fn build(
        headers: &[PathBuf],
        config: &CleanupConfig,
        warnings: &mut Vec<Warning>,
    ) -> Self {
        let mut symbols: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut paths: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

        for path in headers {
            let base = base_name(path);
            paths.entry(base.clone()).or_default().push(path.clone());
            let entry = symbols.entry(base).or_default();

            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    warnings.push(Warning::new(
                        WarningKind::UnreadableFile,
                        format!("cannot read header {}: {}", path.display(), e),
                    ));
                    continue;
                }
            };

            for line in content.lines() {
                let line = normalize_line(line, &config.export_macros);
                if let Some(symbol) = extract_symbol(&line) {
                    if !entry.contains(&symbol) {
                        entry.push(symbol);
                    }
                }
            }
        }

        // manual corrections for headers whose only content is free functions
        for (base, extra) in &config.symbol_overrides {
            let entry = symbols.entry(base.clone()).or_default();
            for symbol in extra {
                if !entry.contains(symbol) {
                    entry.push(symbol.clone());
                }
            }
        }

        for (base, list) in &symbols {
            if list.is_empty() {
                warnings.push(Warning::new(
                    WarningKind::EmptyHeader,
                    format!("header {} has no definitions", base),
                ));
            }
        }

        for (base, list) in &paths {
            if list.len() > 1 {
                let joined = list
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                warnings.push(Warning::new(
                    WarningKind::DuplicateHeader,
                    format!("several header files with name {}: {}", base, joined),
                ));
            }
        }

        Self { symbols, paths }
    }

    pub fn contains(&self, base: &str) -> bool {
        self.symbols.contains_key(base)
    }

    pub fn symbols_for(&self, base: &str) -> Option<&[String]> {
        self.symbols.get(base).map(|v| v.as_slice())
    }

    /// Iterate over all known base names.
    pub fn bases(&self) -> impl Iterator<Item = &String> {
        self.symbols.keys()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.values().map(|v| v.len()).sum()
    }

    #[cfg(test)]
    pub fn paths_for(&self, base: &str) -> Option<&[PathBuf]> {
        self.paths.get(base).map(|v| v.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WarningKind;
    use std::path::PathBuf;

    fn write_header(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).expect("write header");
        path
    }

    fn build(headers: &[PathBuf]) -> (HeaderSymbolTable, Vec<Warning>) {
        let mut warnings = Vec::new();
        let table = HeaderSymbolTable::build(headers, &CleanupConfig::default(), &mut warnings);
        (table, warnings)
    }

    #[test]
    fn recognizes_class_struct_enum_and_aliases() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let header = write_header(
            tmp.path(),
            "Variant.h",
            "#pragma once\n\
             class CPPNGSSHARED_EXPORT Variant : public BasicVariant\n{\n};\n\
             struct VariantTranscript\n{\n};\n\
             enum AnalysisStatus {PENDING, DONE};\n\
             enum class VariantType : int\n{\n};\n\
             using VariantList = QList<Variant>;\n\
             typedef QPair<int, int> VariantRange;\n",
        );

        let (table, warnings) = build(&[header]);
        assert!(warnings.is_empty());
        let symbols = table.symbols_for("Variant").expect("entry");
        assert_eq!(
            symbols,
            &[
                "Variant".to_string(),
                "VariantTranscript".to_string(),
                "AnalysisStatus".to_string(),
                "VariantType".to_string(),
                "VariantList".to_string(),
                "VariantRange".to_string(),
            ]
        );
    }

    #[test]
    fn forward_declarations_and_using_namespace_are_skipped() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let header = write_header(
            tmp.path(),
            "Fwd.h",
            "class Hidden;\nusing namespace std;\nclass Real\n{\n};\n",
        );

        let (table, _warnings) = build(&[header]);
        assert_eq!(table.symbols_for("Fwd"), Some(&["Real".to_string()][..]));
    }

    #[test]
    fn enum_class_rule_wins_over_enum_rule() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let header = write_header(tmp.path(), "Mode.h", "enum class Mode { A, B };\n");

        let (table, _warnings) = build(&[header]);
        assert_eq!(table.symbols_for("Mode"), Some(&["Mode".to_string()][..]));
    }

    #[test]
    fn duplicates_within_one_header_collapse() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let header = write_header(
            tmp.path(),
            "Dup.h",
            "class Dup\n{\n};\n#ifdef OTHER\nclass Dup\n{\n};\n#endif\n",
        );

        let (table, _warnings) = build(&[header]);
        assert_eq!(table.symbols_for("Dup"), Some(&["Dup".to_string()][..]));
    }

    #[test]
    fn empty_header_warns_once_and_stays_in_table() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let header = write_header(tmp.path(), "Helpers.h", "void doStuff();\n");

        let (table, warnings) = build(&[header]);
        assert!(table.contains("Helpers"));
        assert_eq!(table.symbols_for("Helpers"), Some(&[][..]));
        let empties: Vec<_> = warnings
            .iter()
            .filter(|w| w.kind == WarningKind::EmptyHeader)
            .collect();
        assert_eq!(empties.len(), 1);
        assert!(empties[0].message.contains("Helpers"));
    }

    #[test]
    fn symbol_override_rescues_free_function_header() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let header = write_header(tmp.path(), "Helpers.h", "void doStuff();\n");

        let mut config = CleanupConfig::default();
        config
            .symbol_overrides
            .insert("Helpers".to_string(), vec!["doStuff".to_string()]);

        let mut warnings = Vec::new();
        let table = HeaderSymbolTable::build(&[header], &config, &mut warnings);
        assert_eq!(table.symbols_for("Helpers"), Some(&["doStuff".to_string()][..]));
        assert!(warnings.iter().all(|w| w.kind != WarningKind::EmptyHeader));
    }

    #[test]
    fn duplicate_base_names_warn_once_per_base() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        std::fs::create_dir_all(tmp.path().join("a")).expect("dir a");
        std::fs::create_dir_all(tmp.path().join("b")).expect("dir b");
        let first = write_header(&tmp.path().join("a"), "Same.h", "class SameA\n{\n};\n");
        let second = write_header(&tmp.path().join("b"), "Same.h", "class SameB\n{\n};\n");

        let (table, warnings) = build(&[first, second]);
        let dups: Vec<_> = warnings
            .iter()
            .filter(|w| w.kind == WarningKind::DuplicateHeader)
            .collect();
        assert_eq!(dups.len(), 1);
        assert!(dups[0].message.contains("Same"));
        assert_eq!(table.paths_for("Same").map(|p| p.len()), Some(2));
        // symbols from both paths merge under the shared base name
        let merged = table.symbols_for("Same").expect("entry");
        assert!(merged.contains(&"SameA".to_string()));
        assert!(merged.contains(&"SameB".to_string()));
    }
}
