use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// True when the path has one of the given extensions (case-insensitive).
pub fn matches_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            extensions.iter().any(|want| *want == ext)
        })
        .unwrap_or(false)
}

/// Recursively collect files with matching extensions, sorted per directory
/// so repeated runs over an unchanged tree visit files in the same order.
/// Hidden entries (dotfiles, dot-directories) are skipped.
pub fn gather_files(dir: &Path, extensions: &[&str], files: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut dir_entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .collect();

    dir_entries.sort_by(|a, b| {
        a.file_name()
            .to_string_lossy()
            .to_lowercase()
            .cmp(&b.file_name().to_string_lossy().to_lowercase())
    });

    for entry in dir_entries {
        let path = entry.path();
        if path.is_file() {
            if matches_extension(&path, extensions) {
                files.push(path);
            }
            continue;
        }
        if path.is_dir() {
            gather_files(&path, extensions, files)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::gather_files;

    #[test]
    fn gather_files_filters_by_extension_and_skips_hidden() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let root = tmp.path();
        std::fs::create_dir_all(root.join("nested")).expect("tmp nested dir");
        std::fs::write(root.join("keep.h"), "// ok").expect("write keep.h");
        std::fs::write(root.join("keep.cpp"), "// ok").expect("write keep.cpp");
        std::fs::write(root.join("skip.txt"), "// skip").expect("write skip.txt");
        std::fs::write(root.join(".hidden.h"), "// hidden").expect("write hidden");
        std::fs::write(root.join("nested").join("deep.h"), "// deep").expect("write deep.h");

        let mut files = Vec::new();
        gather_files(root, &["h", "cpp"], &mut files).expect("gather files");

        let as_strings: Vec<String> = files
            .iter()
            .map(|p| p.file_name().expect("file name").to_string_lossy().to_string())
            .collect();
        assert!(as_strings.contains(&"keep.h".to_string()));
        assert!(as_strings.contains(&"keep.cpp".to_string()));
        assert!(as_strings.contains(&"deep.h".to_string()));
        assert!(!as_strings.contains(&"skip.txt".to_string()));
        assert!(!as_strings.contains(&".hidden.h".to_string()));
    }

    #[test]
    fn gather_files_orders_per_directory() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let root = tmp.path();
        std::fs::write(root.join("Zebra.h"), "").expect("write");
        std::fs::write(root.join("alpha.h"), "").expect("write");

        let mut files = Vec::new();
        gather_files(root, &["h"], &mut files).expect("gather files");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().expect("name").to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["alpha.h".to_string(), "Zebra.h".to_string()]);
    }
}
