//! In-memory prefix registry, seeded from disk at startup and updated by
//! remote fetches.

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::models::{PrefixVersionsIndex, PrefixesIndex, VersionIndex};
use crate::utils::storage::read_json;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::fs;

/// A named release channel and the versions known for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    pub id: String,

    /// Human-readable description
    pub about: String,

    /// Known version ids, descending lexicographic order (not semver order)
    pub versions: Vec<String>,

    pub latest_version_id: Option<String>,
}

impl Prefix {
    pub fn new(id: impl Into<String>, about: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            about: about.into(),
            versions: Vec::new(),
            latest_version_id: None,
        }
    }

    fn sort_versions(&mut self) {
        self.versions.sort_by(|a, b| b.cmp(a));
        self.versions.dedup();
    }

    /// Record versions discovered on disk
    pub fn add_local_versions(&mut self, version_ids: impl IntoIterator<Item = String>) {
        self.versions.extend(version_ids);
        self.sort_versions();

        // Local discovery takes the entry after the newest one; a remote
        // fetch overrides it with the server's choice.
        if self.versions.len() > 1 {
            self.latest_version_id = Some(self.versions[1].clone());
        }
    }

    /// Fold a remote version list into this prefix
    pub fn merge_remote(&mut self, remote: PrefixVersionsIndex) {
        self.latest_version_id = if remote.latest.is_empty() {
            None
        } else {
            Some(remote.latest)
        };

        let mut known: HashSet<String> = self.versions.iter().cloned().collect();
        for version_id in remote.versions {
            if known.insert(version_id.clone()) {
                self.versions.push(version_id);
            }
        }

        self.sort_versions();
    }
}

/// Owns the prefixes index and the prefix map.
/// Populated at construction from storage; mutated only by the fetch orchestrator.
#[derive(Debug, Clone, Default)]
pub struct VersionRegistry {
    index: PrefixesIndex,
    prefixes: HashMap<String, Prefix>,
}

impl VersionRegistry {
    /// Load the persisted prefixes index and scan every prefix for local versions
    pub async fn load(config: &StoreConfig) -> Self {
        let index_path = config.prefixes_index_path();

        let index = match read_json::<PrefixesIndex>(&index_path).await {
            Ok(index) => index,
            Err(StoreError::Storage { ref source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("Default version index has been created");
                PrefixesIndex::default()
            }
            Err(e) => {
                log::warn!("Failed to load the prefixes index: {}", e);
                PrefixesIndex::default()
            }
        };

        Self::from_index(config, index).await
    }

    /// Build a registry from an already loaded index
    pub async fn from_index(config: &StoreConfig, index: PrefixesIndex) -> Self {
        let mut prefixes = HashMap::new();

        for (id, info) in &index.prefixes {
            if id.is_empty() {
                continue;
            }

            let mut prefix = Prefix::new(id.as_str(), info.about.as_str());
            match config.prefix_dir(id) {
                Ok(prefix_dir) => find_local_versions(&prefix_dir, &mut prefix).await,
                Err(e) => log::warn!("Skipping local scan of the prefix '{}': {}", id, e),
            }
            prefixes.insert(id.clone(), prefix);
        }

        log::info!("Initialized with {} prefix(es)", index.prefixes.len());

        Self { index, prefixes }
    }

    pub fn index(&self) -> &PrefixesIndex {
        &self.index
    }

    pub fn prefixes(&self) -> &HashMap<String, Prefix> {
        &self.prefixes
    }

    pub fn prefix(&self, id: &str) -> Option<&Prefix> {
        self.prefixes.get(id)
    }

    /// Merge a remote prefixes index, creating records for unknown prefixes.
    /// Returns the prefix ids whose version lists should be fetched next.
    pub fn merge_remote_index(&mut self, remote: PrefixesIndex) -> Vec<String> {
        for (id, info) in &remote.prefixes {
            if id.is_empty() {
                continue;
            }
            self.prefixes
                .entry(id.clone())
                .or_insert_with(|| Prefix::new(id.as_str(), info.about.as_str()));
        }

        let mut queue = self.index.merge(remote);
        queue.retain(|id| {
            if id.is_empty() {
                log::warn!("Ignoring a prefix with an empty id");
            }
            !id.is_empty()
        });
        queue
    }

    pub fn apply_prefix_versions(&mut self, prefix_id: &str, remote: PrefixVersionsIndex) {
        self.prefixes
            .entry(prefix_id.to_string())
            .or_insert_with(|| Prefix::new(prefix_id, ""))
            .merge_remote(remote);
    }
}

/// Scan a prefix directory for version folders whose manifest id matches
/// the folder name. Unreadable or mismatched entries are skipped.
pub async fn find_local_versions(prefix_dir: &Path, prefix: &mut Prefix) {
    let mut entries = match fs::read_dir(prefix_dir).await {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("No local versions for '{}' in {:?}: {}", prefix.id, prefix_dir, e);
            return;
        }
    };

    let mut found = Vec::new();

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                log::warn!("Failed to read {:?}: {}", prefix_dir, e);
                break;
            }
        };

        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        if !is_dir {
            continue;
        }

        let Ok(version_id) = entry.file_name().into_string() else {
            continue;
        };

        let index_path = entry.path().join(format!("{}.json", version_id));
        let version_index = match read_json::<VersionIndex>(&index_path).await {
            Ok(index) => index,
            Err(StoreError::Storage { .. }) => continue,
            Err(e) => {
                log::warn!("Skipping local version '{}': {}", version_id, e);
                continue;
            }
        };

        if version_index.id != version_id {
            log::warn!(
                "A version index '{}' contains the wrong version id '{}'",
                index_path.display(),
                version_index.id
            );
            continue;
        }

        log::info!("Local version is found: '{}/{}'", prefix.id, version_id);
        found.push(version_id);
    }

    prefix.add_local_versions(found);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_manifest(prefix_dir: &Path, folder: &str, id: &str) {
        let dir = prefix_dir.join(folder);
        std::fs::create_dir_all(&dir).unwrap();
        let manifest = json!({ "id": id, "assets": "legacy" });
        std::fs::write(
            dir.join(format!("{}.json", folder)),
            serde_json::to_vec(&manifest).unwrap(),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn local_scan_accepts_only_matching_ids() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix_dir = tmp.path().join("release");
        write_manifest(&prefix_dir, "1.7.10", "1.7.10");
        write_manifest(&prefix_dir, "1.12.2", "1.12.2");
        write_manifest(&prefix_dir, "1.10", "1.9");
        std::fs::create_dir_all(prefix_dir.join("empty")).unwrap();
        std::fs::write(prefix_dir.join("stray.json"), "{}").unwrap();

        let mut prefix = Prefix::new("release", "Stable");
        find_local_versions(&prefix_dir, &mut prefix).await;

        assert_eq!(prefix.versions, vec!["1.7.10", "1.12.2"]);
    }

    #[tokio::test]
    async fn local_scan_sets_latest_to_second_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix_dir = tmp.path().join("release");
        write_manifest(&prefix_dir, "1.5.2", "1.5.2");
        write_manifest(&prefix_dir, "1.7.10", "1.7.10");
        write_manifest(&prefix_dir, "1.6.4", "1.6.4");

        let mut prefix = Prefix::new("release", "Stable");
        find_local_versions(&prefix_dir, &mut prefix).await;

        assert_eq!(prefix.versions, vec!["1.7.10", "1.6.4", "1.5.2"]);
        assert_eq!(prefix.latest_version_id.as_deref(), Some("1.6.4"));
    }

    #[tokio::test]
    async fn single_local_version_leaves_latest_unset() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix_dir = tmp.path().join("release");
        write_manifest(&prefix_dir, "1.7.10", "1.7.10");

        let mut prefix = Prefix::new("release", "Stable");
        find_local_versions(&prefix_dir, &mut prefix).await;

        assert_eq!(prefix.versions, vec!["1.7.10"]);
        assert!(prefix.latest_version_id.is_none());
    }

    #[tokio::test]
    async fn missing_prefix_dir_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut prefix = Prefix::new("snapshot", "");
        find_local_versions(&tmp.path().join("snapshot"), &mut prefix).await;
        assert!(prefix.versions.is_empty());
    }

    #[test]
    fn remote_merge_is_a_sorted_union() {
        let mut prefix = Prefix::new("release", "Stable");
        prefix.versions = vec!["1.7.10".to_string(), "1.12.2".to_string()];

        prefix.merge_remote(PrefixVersionsIndex {
            latest: "1.12.2".to_string(),
            versions: vec![
                "1.12.2".to_string(),
                "1.5.2".to_string(),
                "1.10".to_string(),
                "1.5.2".to_string(),
            ],
        });

        assert_eq!(prefix.versions, vec!["1.7.10", "1.5.2", "1.12.2", "1.10"]);
        assert_eq!(prefix.latest_version_id.as_deref(), Some("1.12.2"));
        assert!(prefix.versions.windows(2).all(|w| w[0] > w[1]));
    }

    #[tokio::test]
    async fn load_without_index_starts_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let config = StoreConfig::new("http://localhost", tmp.path());

        let registry = VersionRegistry::load(&config).await;

        assert!(registry.prefixes().is_empty());
        assert!(registry.index().prefixes.is_empty());
    }

    #[tokio::test]
    async fn load_seeds_prefixes_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let config = StoreConfig::new("http://localhost", tmp.path());
        std::fs::create_dir_all(config.versions_dir()).unwrap();
        std::fs::write(
            config.prefixes_index_path(),
            json!({ "prefixes": { "release": { "about": "Stable" }, "": { "about": "broken" } } })
                .to_string(),
        )
        .unwrap();
        write_manifest(&config.prefix_dir("release").unwrap(), "1.12.2", "1.12.2");

        let registry = VersionRegistry::load(&config).await;

        assert_eq!(registry.prefixes().len(), 1);
        let release = registry.prefix("release").unwrap();
        assert_eq!(release.about, "Stable");
        assert_eq!(release.versions, vec!["1.12.2"]);
    }

    #[test]
    fn merge_remote_index_creates_unknown_prefixes() {
        let mut registry = VersionRegistry::default();
        let remote: PrefixesIndex = serde_json::from_value(json!({
            "prefixes": {
                "release": { "about": "Stable" },
                "snapshot": { "about": "Weekly" }
            }
        }))
        .unwrap();

        let queue = registry.merge_remote_index(remote);

        assert_eq!(queue, vec!["release", "snapshot"]);
        assert_eq!(registry.prefix("snapshot").unwrap().about, "Weekly");
        assert_eq!(registry.index().prefixes.len(), 2);
    }
}
