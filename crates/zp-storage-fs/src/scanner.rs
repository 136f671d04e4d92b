//! Markdown document discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

/// Discovers markdown documents under a source directory.
///
/// Hidden files and directories are skipped. Exclude patterns match paths
/// relative to the source directory, e.g. `includes/**` or `*.draft.md`.
pub struct Scanner {
    source_dir: PathBuf,
    excludes: Vec<Pattern>,
}

impl Scanner {
    /// Create a new Scanner rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            excludes: Vec::new(),
        }
    }

    /// Skip documents whose relative path matches any of `patterns`.
    ///
    /// Invalid patterns are ignored; configuration validation reports them.
    #[must_use]
    pub fn with_excludes(mut self, patterns: &[String]) -> Self {
        self.excludes = patterns
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect();
        self
    }

    /// Scan the filesystem and return markdown document paths, sorted.
    ///
    /// Returns an empty Vec if the source directory doesn't exist. A source
    /// that is itself a markdown file yields just that file.
    #[must_use]
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if self.source_dir.is_dir() {
            self.scan_directory(&self.source_dir, &mut paths);
        } else if is_markdown(&self.source_dir) {
            paths.push(self.source_dir.clone());
        }
        paths.sort();
        paths
    }

    fn scan_directory(&self, dir_path: &Path, paths: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %dir_path.display(), error = %e, "Failed to read directory");
                return;
            }
        };

        for entry in entries.filter_map(Result::ok) {
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

            if is_dir {
                self.scan_directory(&path, paths);
            } else if is_markdown(&path) && !self.is_excluded(&path) {
                paths.push(path);
            }
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.source_dir).unwrap_or(path);
        self.excludes.iter().any(|p| p.matches_path(relative))
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("md"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn relative(root: &Path, paths: &[PathBuf]) -> Vec<String> {
        paths
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
    fn test_scan_finds_md_files_recursively() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("user-get.md"), "# Get user").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "not markdown").unwrap();

        let nested = temp_dir.path().join("api").join("v1");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("group-list.md"), "# List groups").unwrap();

        let paths = Scanner::new(temp_dir.path()).scan();

        assert_eq!(
            relative(temp_dir.path(), &paths),
            vec!["api/v1/group-list.md", "user-get.md"]
        );
    }

    #[test]
    fn test_scan_skips_hidden_entries() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join(".hidden.md"), "# Hidden").unwrap();
        fs::write(temp_dir.path().join("visible.md"), "# Visible").unwrap();
        let hidden_dir = temp_dir.path().join(".git");
        fs::create_dir(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("inside.md"), "# Inside").unwrap();

        let paths = Scanner::new(temp_dir.path()).scan();

        assert_eq!(relative(temp_dir.path(), &paths), vec!["visible.md"]);
    }

    #[test]
    fn test_scan_applies_excludes() {
        let temp_dir = create_test_dir();
        let includes = temp_dir.path().join("includes");
        fs::create_dir(&includes).unwrap();
        fs::write(includes.join("snippet.md"), "snippet").unwrap();
        fs::write(temp_dir.path().join("page.md"), "page").unwrap();
        fs::write(temp_dir.path().join("page.draft.md"), "draft").unwrap();

        let paths = Scanner::new(temp_dir.path())
            .with_excludes(&["includes/**".to_owned(), "*.draft.md".to_owned()])
            .scan();

        assert_eq!(relative(temp_dir.path(), &paths), vec!["page.md"]);
    }

    #[test]
    fn test_scan_single_file_source() {
        let temp_dir = create_test_dir();
        let file = temp_dir.path().join("page.md");
        fs::write(&file, "page").unwrap();

        assert_eq!(Scanner::new(&file).scan(), vec![file]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let paths = Scanner::new("/nonexistent/docs").scan();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_invalid_exclude_ignored() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("page.md"), "page").unwrap();

        let paths = Scanner::new(temp_dir.path())
            .with_excludes(&["[unclosed".to_owned()])
            .scan();

        assert_eq!(paths.len(), 1);
    }
}
