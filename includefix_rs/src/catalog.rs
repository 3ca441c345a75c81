//! Framework Header Catalog.
//!
//! Index of the external UI framework's public header namespace, built from
//! a recursive walk of its installed include tree. Treated as a read-only
//! oracle during classification; the tool never touches framework files.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::CleanupConfig;
use crate::symbols::HeaderSymbolTable;
use crate::types::{Warning, WarningKind};

pub struct FrameworkCatalog {
    /// lowercase base name -> canonical header path
    headers: HashMap<String, PathBuf>,
    /// lowercase allow-list of symbols served by umbrella headers
    extra: HashSet<String>,
}

/// Private/implementation subtrees are never valid inclusion targets.
fn in_private_subtree(path: &Path) -> bool {
    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|s| s.eq_ignore_ascii_case("private"))
    })
}

impl FrameworkCatalog {
    /// Walk the framework include tree (when one was given) and merge the
    /// configured naming-exception allow-list.
    pub fn build(root: Option<&Path>, config: &CleanupConfig) -> Self {
        let mut headers = HashMap::new();

        if let Some(root) = root {
            for entry in WalkDir::new(root)
                .follow_links(false)
                .into_iter()
                .filter_map(Result::ok)
            {
                let path = entry.path();
                if !entry.file_type().is_file() || in_private_subtree(path) {
                    continue;
                }
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                let Some(base) = name.strip_suffix(".h") else {
                    continue;
                };
                headers.insert(base.to_lowercase(), path.to_path_buf());
            }
        }

        let extra = config
            .framework_extra
            .iter()
            .map(|name| name.to_lowercase())
            .collect();

        Self { headers, extra }
    }

    /// Lookup by lower-cased reference or base name, allow-list included.
    pub fn contains(&self, key_lower: &str) -> bool {
        self.headers.contains_key(key_lower) || self.extra.contains(key_lower)
    }

    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.extra.is_empty()
    }

    /// Project base names that also exist in the framework namespace.
    /// Ambiguous for a human resolving an include, so each is a warning.
    pub fn collisions_with(&self, table: &HeaderSymbolTable, warnings: &mut Vec<Warning>) {
        for base in table.bases() {
            if self.headers.contains_key(&base.to_lowercase()) {
                warnings.push(Warning::new(
                    WarningKind::NameCollision,
                    format!("framework and project header share the name {}.h", base),
                ));
            }
        }
    }
}
