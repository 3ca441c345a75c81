//! Include Classifier.
//!
//! Decides, for one include directive, whether it may be deleted at all and
//! which origin it resolves to: the project's own headers, the framework's
//! header namespace, or neither. Anything unresolvable is reported and kept;
//! the classifier only ever hands confirmed-resolvable includes to the usage
//! check.

use std::path::Path;
use std::sync::OnceLock;

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;

use crate::catalog::FrameworkCatalog;
use crate::config::CleanupConfig;
use crate::symbols::HeaderSymbolTable;
use crate::types::{Classification, IncludeDirective, SkipReason, SourceFile};

/// Diagnostics umbrella headers: usage shows up through helper entry points,
/// not the header's own name.
const DEBUG_UMBRELLAS: &[&str] = &["qdebug", "qtdebug"];
const DEBUG_ENTRY_POINTS: &[&str] = &["qDebug", "qWarning"];

fn include_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^\s*#\s*include\s*(?:<([^>]+)>|"([^"]+)")(.*)$"#)
            .expect("valid include regex")
    })
}

/// Parse one line as an include directive, if it is one.
pub fn parse_include(line_idx: usize, line: &str) -> Option<IncludeDirective> {
    let caps = include_re().captures(line)?;
    let token = caps
        .get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().trim())?;
    let rest = caps.get(3).map(|m| m.as_str()).unwrap_or("");

    let reference = token.strip_suffix(".h").unwrap_or(token).to_string();
    let basename = reference
        .rsplit('/')
        .next()
        .unwrap_or(reference.as_str())
        .to_string();

    Some(IncludeDirective {
        raw: line.to_string(),
        reference,
        basename,
        line: line_idx,
        trailing_comment: rest.contains("//"),
    })
}

/// Load a file's lines, its include directives and the lower-cased
/// include-stripped usage corpus in one pass. Lines keep their original
/// endings so the rewriter can reproduce retained lines byte-identical.
pub fn parse_source(path: &Path, content: &str) -> SourceFile {
    let lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
    let mut includes = Vec::new();
    let mut corpus = String::new();

    for (idx, raw) in lines.iter().enumerate() {
        let line = raw.trim_end_matches(['\n', '\r']);
        if let Some(directive) = parse_include(idx, line) {
            includes.push(directive);
        } else {
            corpus.push_str(&line.trim().to_lowercase());
            corpus.push('\n');
        }
    }

    SourceFile {
        path: path.to_path_buf(),
        lines,
        includes,
        corpus,
    }
}

/// Read-only classification oracle, built once after the two lookup tables.
pub struct Classifier<'a> {
    table: &'a HeaderSymbolTable,
    catalog: &'a FrameworkCatalog,
    config: &'a CleanupConfig,
    exempt: GlobSet,
}

impl<'a> Classifier<'a> {
    pub fn new(
        table: &'a HeaderSymbolTable,
        catalog: &'a FrameworkCatalog,
        config: &'a CleanupConfig,
    ) -> anyhow::Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.exempt_modules {
            let glob = Glob::new(pattern)
                .with_context(|| format!("invalid exempt-module glob '{pattern}'"))?;
            builder.add(glob);
        }
        let exempt = builder.build().context("building exempt-module globs")?;

        Ok(Self {
            table,
            catalog,
            config,
            exempt,
        })
    }

    fn skip_reason(&self, file: &Path, d: &IncludeDirective) -> Option<SkipReason> {
        // a trailing comment is an explicit human override
        if d.trailing_comment {
            return Some(SkipReason::TrailingComment);
        }
        if d.basename.starts_with("ui_") {
            return Some(SkipReason::GeneratedUi);
        }
        if d.reference.ends_with(".moc") {
            return Some(SkipReason::MetaObject);
        }
        if d.reference.ends_with("/qglobal") {
            return Some(SkipReason::QtGlobal);
        }
        if self.config.global_headers.iter().any(|h| *h == d.reference) {
            return Some(SkipReason::GlobalHeader);
        }
        if self.config.test_headers.iter().any(|h| *h == d.reference) {
            return Some(SkipReason::TestHeader);
        }
        if d.reference.ends_with(".cpp") {
            return Some(SkipReason::ForeignSource);
        }
        if self.config.std_keep.iter().any(|h| *h == d.reference) {
            return Some(SkipReason::StdAlwaysKept);
        }
        if self
            .config
            .vendored_prefixes
            .iter()
            .any(|p| d.reference.starts_with(p.as_str()))
        {
            return Some(SkipReason::VendoredLibrary);
        }
        if self.exempt.is_match(file) {
            return Some(SkipReason::ExemptModule);
        }
        None
    }

    /// Classify one directive within its enclosing file.
    pub fn classify(&self, file: &Path, d: &IncludeDirective) -> Classification {
        if let Some(reason) = self.skip_reason(file, d) {
            return Classification::Skip(reason);
        }

        let ref_lower = d.reference.to_lowercase();
        let base_lower = d.basename.to_lowercase();

        if self.catalog.contains(&ref_lower) || self.catalog.contains(&base_lower) {
            let names = if DEBUG_UMBRELLAS.contains(&base_lower.as_str()) {
                DEBUG_ENTRY_POINTS.iter().map(|s| s.to_string()).collect()
            } else {
                vec![d.basename.clone()]
            };
            return Classification::Framework { names };
        }

        if self.table.contains(&d.reference) || self.table.contains(&d.basename) {
            let symbols = self
                .table
                .symbols_for(&d.basename)
                .filter(|s| !s.is_empty())
                .or_else(|| self.table.symbols_for(&d.reference).filter(|s| !s.is_empty()));
            let names = match symbols {
                Some(list) => list.to_vec(),
                // zero-definition header: fall back to the base name so the
                // retention bias survives even a broken extraction
                None => vec![d.basename.clone()],
            };
            return Classification::Internal { names };
        }

        Classification::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Warning;
    use std::path::PathBuf;

    fn directive(line: &str) -> IncludeDirective {
        parse_include(0, line).expect("include line")
    }

    struct Fixture {
        _project: tempfile::TempDir,
        _qt: tempfile::TempDir,
        table: HeaderSymbolTable,
        catalog: FrameworkCatalog,
        config: CleanupConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let project = tempfile::tempdir().expect("project dir");
            let foo = project.path().join("Foo.h");
            std::fs::write(&foo, "class FooBar\n{\n};\n").expect("write Foo.h");
            let empty = project.path().join("Empty.h");
            std::fs::write(&empty, "void freeFn();\n").expect("write Empty.h");

            let qt = tempfile::tempdir().expect("qt dir");
            let core = qt.path().join("QtCore");
            std::fs::create_dir_all(&core).expect("QtCore");
            std::fs::write(core.join("qdebug.h"), "").expect("qdebug.h");
            std::fs::write(core.join("qstring.h"), "").expect("qstring.h");

            let config = CleanupConfig::default();
            let mut warnings: Vec<Warning> = Vec::new();
            let table = HeaderSymbolTable::build(
                &[foo, empty],
                &config,
                &mut warnings,
            );
            let catalog = FrameworkCatalog::build(Some(qt.path()), &config);

            Self {
                _project: project,
                _qt: qt,
                table,
                catalog,
                config,
            }
        }

        fn classify(&self, file: &str, line: &str) -> Classification {
            let classifier = Classifier::new(&self.table, &self.catalog, &self.config)
                .expect("classifier");
            classifier.classify(&PathBuf::from(file), &directive(line))
        }
    }

    #[test]
    fn parse_include_normalizes_reference_and_basename() {
        let d = directive("#include \"Auxilary/Foo.h\"");
        assert_eq!(d.reference, "Auxilary/Foo");
        assert_eq!(d.basename, "Foo");
        assert!(!d.trailing_comment);

        let d = directive("#include <QDebug>");
        assert_eq!(d.reference, "QDebug");
        assert_eq!(d.basename, "QDebug");
    }

    #[test]
    fn parse_include_only_strips_trailing_header_extension() {
        let d = directive("#include \"main.moc\"");
        assert_eq!(d.reference, "main.moc");
        let d = directive("#include \"foreign.cpp\"");
        assert_eq!(d.reference, "foreign.cpp");
    }

    #[test]
    fn parse_include_detects_trailing_comment() {
        let d = directive("#include \"Bar.h\" //keep");
        assert!(d.trailing_comment);
    }

    #[test]
    fn non_include_lines_do_not_parse() {
        assert!(parse_include(0, "int x = 1; // #include \"Foo.h\"").is_none());
        assert!(parse_include(0, "#define FOO 1").is_none());
    }

    #[test]
    fn skip_rules_cover_every_reason() {
        let f = Fixture::new();
        let cases = [
            ("#include \"Foo.h\" //keep", SkipReason::TrailingComment),
            ("#include \"ui_MainWindow.h\"", SkipReason::GeneratedUi),
            ("#include \"main.moc\"", SkipReason::MetaObject),
            ("#include <QtCore/qglobal.h>", SkipReason::QtGlobal),
            ("#include \"cppNGS_global.h\"", SkipReason::GlobalHeader),
            ("#include \"TestFrameworkNGS.h\"", SkipReason::TestHeader),
            ("#include \"other.cpp\"", SkipReason::ForeignSource),
            ("#include <cmath>", SkipReason::StdAlwaysKept),
            ("#include \"htslib/sam.h\"", SkipReason::VendoredLibrary),
        ];
        for (line, reason) in cases {
            assert_eq!(
                f.classify("/src/Widget.cpp", line),
                Classification::Skip(reason),
                "line: {line}"
            );
        }
    }

    #[test]
    fn exempt_module_skips_every_include_in_the_file() {
        let f = Fixture::new();
        assert_eq!(
            f.classify("/src/QrCodeGenerator/qr.cpp", "#include <QDebug>"),
            Classification::Skip(SkipReason::ExemptModule)
        );
    }

    #[test]
    fn framework_includes_resolve_via_catalog_and_allow_list() {
        let f = Fixture::new();
        assert_eq!(
            f.classify("/src/Widget.cpp", "#include <QString>"),
            Classification::Framework {
                names: vec!["QString".to_string()]
            }
        );
        // allow-list umbrella, not present as a .h in the fake tree
        assert_eq!(
            f.classify("/src/Widget.cpp", "#include <QVariantList>"),
            Classification::Framework {
                names: vec!["QVariantList".to_string()]
            }
        );
    }

    #[test]
    fn debug_umbrella_searches_helper_entry_points() {
        let f = Fixture::new();
        assert_eq!(
            f.classify("/src/Widget.cpp", "#include <QDebug>"),
            Classification::Framework {
                names: vec!["qDebug".to_string(), "qWarning".to_string()]
            }
        );
        assert_eq!(
            f.classify("/src/Widget.cpp", "#include <QtDebug>"),
            Classification::Framework {
                names: vec!["qDebug".to_string(), "qWarning".to_string()]
            }
        );
    }

    #[test]
    fn internal_includes_carry_declared_symbols() {
        let f = Fixture::new();
        assert_eq!(
            f.classify("/src/Widget.cpp", "#include \"Foo.h\""),
            Classification::Internal {
                names: vec!["FooBar".to_string()]
            }
        );
    }

    #[test]
    fn empty_internal_header_falls_back_to_base_name() {
        let f = Fixture::new();
        assert_eq!(
            f.classify("/src/Widget.cpp", "#include \"Empty.h\""),
            Classification::Internal {
                names: vec!["Empty".to_string()]
            }
        );
    }

    #[test]
    fn unresolvable_include_is_unknown() {
        let f = Fixture::new();
        assert_eq!(
            f.classify("/src/Widget.cpp", "#include <mystery/thing.hpp>"),
            Classification::Unknown
        );
    }

    #[test]
    fn corpus_excludes_include_lines_and_lowercases() {
        let src = parse_source(
            &PathBuf::from("/src/Widget.cpp"),
            "#include \"Foo.h\"\nFooBar x;\n  # include <QDebug>\nreturn X;\n",
        );
        assert_eq!(src.includes.len(), 2);
        assert_eq!(src.corpus, "foobar x;\nreturn x;\n");
        assert_eq!(src.lines.len(), 4);
    }
}
