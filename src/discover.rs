//! Source file discovery.
//!
//! Walks the source root recursively and collects configuration files in a
//! deterministic order: entries of each directory are visited by file name.

use crate::error::{CkeError, Result};
use globset::GlobSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What counts as a source file.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// File extension without the leading dot.
    pub extension: String,
    /// Paths (relative to the root, forward slashes) to skip.
    pub exclude: GlobSet,
}

/// List every source file under `root`.
///
/// Any walk error aborts discovery: evaluating a partial file set would
/// silently produce incomplete configuration.
pub fn discover_sources(root: &Path, options: &DiscoveryOptions) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{}", options.extension);
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            CkeError::Discovery(format!("failed to walk '{}': {}", root.display(), e))
        })?;
        if entry.file_type().is_dir() {
            continue;
        }

        let matches_extension = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&suffix));
        if !matches_extension {
            continue;
        }

        let path = entry.into_path();
        if is_excluded(&path, root, &options.exclude) {
            continue;
        }
        files.push(path);
    }

    Ok(files)
}

fn is_excluded(path: &Path, root: &Path, exclude: &GlobSet) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let relative = path.strip_prefix(root).unwrap_or(path);
    let normalized = relative.to_string_lossy().replace('\\', "/");
    exclude.is_match(normalized.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use globset::{Glob, GlobSetBuilder};
    use std::fs;
    use tempfile::TempDir;

    fn options(exclude: &[&str]) -> DiscoveryOptions {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude {
            builder.add(Glob::new(pattern).unwrap());
        }
        DiscoveryOptions {
            extension: "cke".to_string(),
            exclude: builder.build().unwrap(),
        }
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn relative(files: &[PathBuf], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_finds_source_files_recursively_in_name_order() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b/service.cke");
        touch(temp.path(), "a/z.cke");
        touch(temp.path(), "a/deploy.cke");
        touch(temp.path(), "top.cke");

        let files = discover_sources(temp.path(), &options(&[])).unwrap();
        assert_eq!(
            relative(&files, temp.path()),
            vec!["a/deploy.cke", "a/z.cke", "b/service.cke", "top.cke"]
        );
    }

    #[test]
    fn test_ignores_other_extensions_and_directories() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "app/main.cke");
        touch(temp.path(), "app/notes.md");
        touch(temp.path(), "app/main.cke.bak");
        fs::create_dir_all(temp.path().join("dir.cke")).unwrap();

        let files = discover_sources(temp.path(), &options(&[])).unwrap();
        assert_eq!(relative(&files, temp.path()), vec!["app/main.cke"]);
    }

    #[test]
    fn test_exclude_globs_skip_files() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "app/main.cke");
        touch(temp.path(), "vendor/lib/base.cke");

        let files = discover_sources(temp.path(), &options(&["vendor/**"])).unwrap();
        assert_eq!(relative(&files, temp.path()), vec!["app/main.cke"]);
    }

    #[test]
    fn test_empty_tree_yields_no_files() {
        let temp = TempDir::new().unwrap();
        let files = discover_sources(temp.path(), &options(&[])).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let result = discover_sources(&temp.path().join("missing"), &options(&[]));
        assert!(matches!(result, Err(CkeError::Discovery(_))));
    }
}
