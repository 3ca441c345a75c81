//! Configuration file support for includefix.
//!
//! All hand-maintained allow-lists live here: export macros stripped during
//! header scanning, the framework naming exceptions, the always-kept standard
//! headers, vendored library prefixes and exempt modules. They are expected
//! to grow independently of the core logic, so they load from an optional
//! `.incfix/config.toml` in the project root, with built-in defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::types::{Warning, WarningKind};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Export/visibility macro tokens stripped before declaration matching.
    pub export_macros: Vec<String>,
    /// Project-wide macro-definition headers, never deletion candidates.
    pub global_headers: Vec<String>,
    /// Test-framework headers, never deletion candidates.
    pub test_headers: Vec<String>,
    /// Standard-library headers that are always kept.
    pub std_keep: Vec<String>,
    /// Vendored third-party include prefixes (trailing slash included).
    pub vendored_prefixes: Vec<String>,
    /// Glob patterns for files whose includes are never touched.
    pub exempt_modules: Vec<String>,
    /// Framework symbols that resolve through umbrella headers rather than
    /// the one-header-per-symbol convention.
    pub framework_extra: Vec<String>,
    /// Manual symbol entries for headers the extractor cannot read,
    /// e.g. headers that only declare free functions.
    pub symbol_overrides: BTreeMap<String, Vec<String>>,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            export_macros: to_strings(&[
                "CPPCORESHARED_EXPORT",
                "CPPNGSSHARED_EXPORT",
                "CPPNGSDSHARED_EXPORT",
                "CPPGUISHARED_EXPORT",
                "CPPRESTSHARED_EXPORT",
            ]),
            global_headers: to_strings(&[
                "cppCORE_global",
                "cppGUI_global",
                "cppNGS_global",
                "cppNGSD_global",
                "cppXML_global",
                "cppREST_global",
                "cppVISUAL_global",
            ]),
            test_headers: to_strings(&["TestFrameworkNGS"]),
            std_keep: to_strings(&[
                "algorithm",
                "cmath",
                "iostream",
                "limits",
                "math",
                "numeric",
                "random",
                "time",
                "tuple",
                "utility",
                "vector",
            ]),
            vendored_prefixes: to_strings(&["htslib/", "libxml/"]),
            exempt_modules: to_strings(&["**/*QrCodeGenerator*", "**/*QrCodeGenerator*/**"]),
            framework_extra: to_strings(&[
                "QDate",
                "QRegularExpressionMatchIterator",
                "QPaintEvent",
                "QContextMenuEvent",
                "QVariantList",
                "QMultiMap",
                "QXmlStreamWriter",
                "QXmlStreamReader",
                "QMetaMethod",
                "QTableWidgetItem",
                "QTreeWidgetItem",
                "QCloseEvent",
                "QTime",
                "QDragEnterEvent",
                "QtGlobal",
                "QtDebug",
                "QDropEvent",
                "QListIterator",
                "QDoubleSpinBox",
                "QListWidgetItem",
                "QProcessEnvironment",
                "QDomElement",
                "QDomDocument",
                "QRandomGenerator",
            ]),
            symbol_overrides: BTreeMap::new(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl CleanupConfig {
    /// Load config from `.incfix/config.toml` in the given root directory.
    /// Returns default config if the file doesn't exist.
    pub fn load(root: &Path, warnings: &mut Vec<Warning>) -> Self {
        let config_path = root.join(".incfix").join("config.toml");
        Self::load_from_path(&config_path, warnings)
    }

    /// Load config from a specific path. A missing file is fine; an
    /// unreadable or invalid one degrades to defaults with a warning.
    pub fn load_from_path(path: &Path, warnings: &mut Vec<Warning>) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warnings.push(Warning::new(
                        WarningKind::Config,
                        format!("failed to parse {}: {}", path.display(), e),
                    ));
                    Self::default()
                }
            },
            Err(e) => {
                warnings.push(Warning::new(
                    WarningKind::Config,
                    format!("failed to read {}: {}", path.display(), e),
                ));
                Self::default()
            }
        }
    }
}
