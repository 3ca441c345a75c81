use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputMode {
    Human,
    Json,
}

/// Why an include line is never a deletion candidate.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Trailing `//` comment on the line, an explicit human override.
    TrailingComment,
    /// Generated UI description header (`ui_*`).
    GeneratedUi,
    /// Compiler-generated meta-object file (`*.moc`).
    MetaObject,
    /// The qglobal umbrella, pulled in for macros rather than types.
    QtGlobal,
    /// Project-wide macro-definition header.
    GlobalHeader,
    /// Test-framework header.
    TestHeader,
    /// Include of a foreign `.cpp` file.
    ForeignSource,
    /// Standard-library header on the always-keep list.
    StdAlwaysKept,
    /// Vendored third-party library path prefix.
    VendoredLibrary,
    /// The enclosing file belongs to an exempt module.
    ExemptModule,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::TrailingComment => "trailing comment",
            SkipReason::GeneratedUi => "generated UI header",
            SkipReason::MetaObject => "meta-object file",
            SkipReason::QtGlobal => "qglobal umbrella",
            SkipReason::GlobalHeader => "global macro header",
            SkipReason::TestHeader => "test-framework header",
            SkipReason::ForeignSource => "foreign .cpp include",
            SkipReason::StdAlwaysKept => "always-kept std header",
            SkipReason::VendoredLibrary => "vendored library",
            SkipReason::ExemptModule => "exempt module",
        }
    }
}

/// One `#include` line at a known position in a source file.
#[derive(Clone, Debug)]
pub struct IncludeDirective {
    /// Line text as found in the file, line ending stripped.
    pub raw: String,
    /// Reference key: include token with delimiters and a trailing `.h` removed.
    pub reference: String,
    /// Final path segment of the reference key.
    pub basename: String,
    /// Zero-based line index.
    pub line: usize,
    /// The line carries a `//` comment after the include token.
    pub trailing_comment: bool,
}

/// Outcome of classifying one include directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Never a deletion candidate.
    Skip(SkipReason),
    /// Resolved against the framework catalog; `names` are the usage candidates.
    Framework { names: Vec<String> },
    /// Resolved against the project symbol table; `names` are the declared symbols.
    Internal { names: Vec<String> },
    /// Not resolvable; reported and conservatively kept.
    Unknown,
}

/// A source file loaded for analysis.
///
/// `lines` keep their original line endings so retained lines can be written
/// back byte-identical. `corpus` is the lower-cased concatenation of all
/// non-include lines and is the only thing the usage checker ever sees.
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
    pub includes: Vec<IncludeDirective>,
    pub corpus: String,
}

/// Per-file set of removable lines: line index -> original line text.
pub type DeletionSet = BTreeMap<usize, String>;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    EmptyHeader,
    DuplicateHeader,
    NameCollision,
    UnknownInclude,
    UnreadableFile,
    Config,
    Catalog,
}

#[derive(Clone, Debug, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Run-wide counters, aggregated across all scanned files.
#[derive(Default, Clone, Debug, Serialize)]
pub struct RunTotals {
    pub files_scanned: usize,
    pub files_rewritten: usize,
    pub includes_seen: usize,
    pub deletions: usize,
    pub unknown_includes: usize,
}

/// One removed include, for reporting.
#[derive(Clone, Debug, Serialize)]
pub struct RemovedInclude {
    pub line: usize,
    pub text: String,
}

/// Per-file scan result that made it into the report.
#[derive(Clone, Debug, Serialize)]
pub struct FileReport {
    pub path: String,
    pub removed: Vec<RemovedInclude>,
    pub rewritten: bool,
}
