//! Persisted, ordered, deduplicated set of topic names.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Flat-file topic registry: one topic name per line, first-seen order.
#[derive(Debug, Clone)]
pub struct TopicRegistry {
    path: PathBuf,
}

impl TopicRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the registry. A missing file is an empty registry.
    pub fn load(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(parse_lines(&contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(Error::ReadFile {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Read the registry, failing when no file has been written yet.
    pub fn load_required(&self) -> Result<Vec<String>> {
        if !self.path.is_file() {
            return Err(Error::RegistryMissing {
                path: self.path.clone(),
            });
        }
        self.load()
    }

    /// Replace the registry file with `topics`.
    ///
    /// Writes a sibling temp file and renames it over the registry so readers
    /// only ever see a complete file.
    pub fn save(&self, topics: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let staging = self.staging_path();
        fs::write(&staging, topics.join("\n")).map_err(|source| Error::WriteFile {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &self.path).map_err(|source| {
            let _ = fs::remove_file(&staging);
            Error::WriteFile {
                path: self.path.clone(),
                source,
            }
        })?;

        debug!(path = %self.path.display(), count = topics.len(), "topic registry saved");
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "topics".to_string());
        self.path.with_file_name(format!(".{file_name}.tmp"))
    }
}

/// Stable set union: `existing` followed by unseen `incoming` entries, first occurrence wins.
pub fn merge(existing: &[String], incoming: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(existing.len() + incoming.len());
    for topic in existing.iter().chain(incoming) {
        if seen.insert(topic.as_str()) {
            merged.push(topic.clone());
        }
    }
    merged
}

/// Split comma-separated user input into trimmed, non-empty topic names.
///
/// Line breaks also separate names, since the registry stores one per line.
pub fn parse_topics(input: &str) -> Vec<String> {
    input
        .split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn topics(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn merge_is_idempotent() {
        let list = topics(&["orders", "payments", "refunds"]);
        assert_eq!(merge(&list, &list), list);
    }

    #[test]
    fn merge_preserves_first_seen_order() {
        let merged = merge(&topics(&["a", "b"]), &topics(&["b", "c", "a"]));
        assert_eq!(merged, topics(&["a", "b", "c"]));
    }

    #[test]
    fn merge_collapses_duplicates_within_incoming() {
        let merged = merge(&[], &topics(&["x", "x", "y", "x"]));
        assert_eq!(merged, topics(&["x", "y"]));
    }

    #[test]
    fn merge_is_case_sensitive() {
        let merged = merge(&topics(&["Orders"]), &topics(&["orders"]));
        assert_eq!(merged, topics(&["Orders", "orders"]));
    }

    #[test]
    fn parse_topics_drops_empty_candidates() {
        assert_eq!(parse_topics("x, , y"), topics(&["x", "y"]));
        assert_eq!(parse_topics(" orders ,payments,"), topics(&["orders", "payments"]));
        assert!(parse_topics(" , ,").is_empty());
    }

    #[test]
    fn parse_topics_splits_embedded_line_breaks() {
        let parsed = parse_topics("orders\npayments,refunds\r\naudits");
        assert_eq!(parsed, topics(&["orders", "payments", "refunds", "audits"]));

        let dir = tempdir().unwrap();
        let registry = TopicRegistry::new(dir.path().join("kafka-topics.txt"));
        registry.save(&parsed).unwrap();
        assert_eq!(registry.load().unwrap(), parsed);
    }

    #[test]
    fn load_of_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let registry = TopicRegistry::new(dir.path().join("kafka-topics.txt"));
        assert!(registry.load().unwrap().is_empty());
    }

    #[test]
    fn load_required_fails_without_file() {
        let dir = tempdir().unwrap();
        let registry = TopicRegistry::new(dir.path().join("kafka-topics.txt"));
        assert!(matches!(
            registry.load_required().unwrap_err(),
            Error::RegistryMissing { .. }
        ));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let registry = TopicRegistry::new(dir.path().join("nested/kafka-topics.txt"));
        let list = topics(&["orders", "payments", "refunds"]);

        registry.save(&list).unwrap();

        assert_eq!(registry.load().unwrap(), list);
        assert_eq!(
            fs::read_to_string(registry.path()).unwrap(),
            "orders\npayments\nrefunds"
        );
        assert!(!dir.path().join("nested/.kafka-topics.txt.tmp").exists());
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = tempdir().unwrap();
        let registry = TopicRegistry::new(dir.path().join("kafka-topics.txt"));
        registry.save(&topics(&["a", "b", "c"])).unwrap();
        registry.save(&topics(&["z"])).unwrap();

        assert_eq!(fs::read_to_string(registry.path()).unwrap(), "z");
    }

    #[test]
    fn load_trims_and_skips_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kafka-topics.txt");
        fs::write(&path, "  orders \n\n payments\r\n\n").unwrap();

        let registry = TopicRegistry::new(&path);
        assert_eq!(registry.load().unwrap(), topics(&["orders", "payments"]));
    }
}
