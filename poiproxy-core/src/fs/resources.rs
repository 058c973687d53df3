//! Recursive resource listing.
//!
//! A development aid: find every file under a root whose canonical path
//! matches a regular expression (e.g. all descriptor documents of a checkout).
//! The pattern must match the whole path, not just part of it.

use anyhow::{Context, Result};
use log::warn;
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists files under a root directory whose path matches a pattern.
#[derive(Debug, Clone)]
pub struct ResourceScanner {
    /// `None` matches everything.
    pattern: Option<Regex>,
}

impl ResourceScanner {
    /// Matches every file.
    pub fn all() -> Self {
        Self { pattern: None }
    }

    /// `pattern` is anchored at both ends: `.*\.json` matches `osm.json`
    /// but `\.json` matches nothing.
    ///
    /// # Errors
    ///
    /// Fails if `pattern` is not a valid regular expression.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(&format!("^(?:{})$", pattern))
            .with_context(|| format!("Invalid resource pattern '{}'", pattern))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Walks `root` recursively and returns matching file paths.
    ///
    /// Paths are canonicalized before matching and returned canonical, in
    /// walk order with siblings sorted by name. A single file root is matched
    /// on its own. Unreadable entries are logged and skipped.
    pub fn scan(&self, root: &Path) -> Vec<PathBuf> {
        let mut resources = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Resources: skipping entry under {:?}: {}", root, e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = match std::fs::canonicalize(entry.path()) {
                Ok(path) => path,
                Err(e) => {
                    warn!("Resources: cannot resolve {:?}: {}", entry.path(), e);
                    continue;
                }
            };

            if self.matches(&path) {
                resources.push(path);
            }
        }

        resources
    }

    fn matches(&self, path: &Path) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.is_match(&path.to_string_lossy()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("services/nested")).unwrap();
        fs::write(dir.path().join("services/osm.json"), "{}").unwrap();
        fs::write(dir.path().join("services/nested/flickr.json"), "{}").unwrap();
        fs::write(dir.path().join("services/readme.md"), "").unwrap();
        dir
    }

    #[test]
    fn test_all_lists_every_file() {
        let dir = tree();
        let found = ResourceScanner::all().scan(dir.path());
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_pattern_filters_recursively() {
        let dir = tree();
        let found = ResourceScanner::new(r".*\.json").unwrap().scan(dir.path());
        let root = dir.path().canonicalize().unwrap();

        assert_eq!(
            found,
            vec![
                root.join("services/nested/flickr.json"),
                root.join("services/osm.json"),
            ]
        );
    }

    #[test]
    fn test_pattern_must_match_whole_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("osm.json"), "{}").unwrap();
        fs::write(dir.path().join("osm.json.bak"), "{}").unwrap();

        assert!(ResourceScanner::new(r"\.json").unwrap().scan(dir.path()).is_empty());

        let found = ResourceScanner::new(r".*\.json").unwrap().scan(dir.path());
        assert_eq!(found, vec![dir.path().canonicalize().unwrap().join("osm.json")]);
    }

    #[test]
    fn test_relative_root_yields_canonical_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("services")).unwrap();
        fs::write(dir.path().join("services/osm.json"), "{}").unwrap();

        let dotted = dir.path().join("services/../services");
        let found = ResourceScanner::all().scan(&dotted);

        assert_eq!(
            found,
            vec![dir.path().canonicalize().unwrap().join("services/osm.json")]
        );
        assert!(found[0].is_absolute());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(ResourceScanner::new("(unclosed").is_err());
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ResourceScanner::all().scan(&dir.path().join("nope")).is_empty());
    }
}
