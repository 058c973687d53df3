//! The descriptor store on disk.
//!
//! It provides the [`DescriptorStore`] structure, responsible for listing the
//! descriptor files of the configured directory and reading them back.
//! It knows nothing about parsing or caching.

use crate::config::RegistryConfig;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

const IO_BUFFER_SIZE: usize = 8 * 1024;

/// A directory holding one descriptor document per service.
#[derive(Debug, Clone)]
pub struct DescriptorStore {
    config: RegistryConfig,
}

impl DescriptorStore {
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    /// Lists the descriptor files of the store.
    ///
    /// Returns `(service_id, file_name)` pairs sorted by file name. A missing
    /// or non-directory store, or an empty suffix, yields nothing; unreadable
    /// entries are skipped.
    pub fn scan(&self) -> Vec<(String, String)> {
        let dir = self.directory();
        info!("Registry: configuration directory {:?}", dir);

        if self.config.suffix.is_empty() {
            warn!("Registry: descriptor suffix is empty, nothing to register");
            return Vec::new();
        }

        if !dir.is_dir() {
            warn!("Registry: {:?} is not a directory, nothing to register", dir);
            return Vec::new();
        }

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Registry: failed to list {:?}: {}", dir, e);
                return Vec::new();
            }
        };

        let mut found = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Registry: skipping unreadable entry in {:?}: {}", dir, e);
                    continue;
                }
            };

            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                debug!("Registry: skipping non UTF-8 file name {:?}", entry.file_name());
                continue;
            };

            let id = match service_id_from_file_name(&name, &self.config.suffix) {
                Some(id) if !id.is_empty() => id.to_string(),
                Some(_) => {
                    warn!("Registry: {:?} has no name before the suffix, skipped", name);
                    continue;
                }
                None => continue,
            };
            found.push((id, name));
        }

        found.sort_by(|a, b| a.1.cmp(&b.1));
        found
    }

    /// Full path of a file inside the store.
    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.directory().join(file_name)
    }

    /// Reads a whole descriptor file as text.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected, so any
    /// readable file produces some text for the parser to judge.
    pub fn read(&self, file_name: &str) -> std::io::Result<String> {
        let file = File::open(self.path_of(file_name))?;
        let mut reader = BufReader::with_capacity(IO_BUFFER_SIZE, file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}

/// Derives a service id from a descriptor file name.
///
/// Returns `None` when `file_name` does not end with `suffix`. Otherwise the id
/// is everything before the FIRST occurrence of `suffix`, so
/// `"a.json.v2.json"` gives `"a"`.
pub fn service_id_from_file_name<'a>(file_name: &'a str, suffix: &str) -> Option<&'a str> {
    if !file_name.ends_with(suffix) {
        return None;
    }
    file_name.find(suffix).map(|idx| &file_name[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_service_id_strips_suffix() {
        assert_eq!(service_id_from_file_name("osm.json", ".json"), Some("osm"));
        assert_eq!(service_id_from_file_name("osm.JSON", ".json"), None);
        assert_eq!(service_id_from_file_name("osm.json.bak", ".json"), None);
        assert_eq!(service_id_from_file_name("readme.txt", ".json"), None);
    }

    #[test]
    fn test_service_id_cuts_at_first_occurrence() {
        assert_eq!(
            service_id_from_file_name("a.json.v2.json", ".json"),
            Some("a")
        );
        assert_eq!(service_id_from_file_name(".json", ".json"), Some(""));
    }

    #[test]
    fn test_scan_lists_matching_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("panoramio.json"), "{}").unwrap();
        fs::write(dir.path().join("flickr.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join(".json"), "{}").unwrap();

        let store = DescriptorStore::new(RegistryConfig::new(dir.path()));
        let found = store.scan();

        assert_eq!(
            found,
            vec![
                ("flickr".to_string(), "flickr.json".to_string()),
                ("panoramio".to_string(), "panoramio.json".to_string()),
            ]
        );
    }

    #[test]
    fn test_scan_with_empty_suffix_registers_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("osm.json"), "{}").unwrap();

        let store = DescriptorStore::new(RegistryConfig::new(dir.path()).with_suffix(""));
        assert!(store.scan().is_empty());
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DescriptorStore::new(RegistryConfig::new(dir.path().join("missing")));
        assert!(store.scan().is_empty());
    }

    #[test]
    fn test_scan_file_instead_of_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("services.json");
        fs::write(&file, "{}").unwrap();

        let store = DescriptorStore::new(RegistryConfig::new(file));
        assert!(store.scan().is_empty());
    }

    #[test]
    fn test_read_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), [b'{', 0xff, b'}']).unwrap();

        let store = DescriptorStore::new(RegistryConfig::new(dir.path()));
        assert_eq!(store.read("bad.json").unwrap(), "{\u{FFFD}}");
    }
}
