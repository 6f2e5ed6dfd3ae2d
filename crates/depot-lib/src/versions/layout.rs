//! Remote URLs and local paths of every store document.
//! The local tree mirrors the remote one: versions live under
//! `<data>/versions`, assets and libraries directly under `<data>`.

use crate::config::{StoreConfig, DATA_INDEX_FILENAME, PREFIXES_INDEX_FILENAME};
use crate::error::{Result, StoreError};
use crate::models::FullVersionId;
use std::path::{Component, Path, PathBuf};

impl StoreConfig {
    pub fn prefixes_url(&self) -> String {
        format!("{}/{}", self.store_url, PREFIXES_INDEX_FILENAME)
    }

    pub fn prefix_versions_url(&self, prefix_id: &str) -> String {
        format!("{}/{}/versions/versions.json", self.store_url, prefix_id)
    }

    pub fn version_index_url(&self, version: &FullVersionId) -> String {
        format!(
            "{}/{}/{}/{}.json",
            self.store_url, version.prefix, version.id, version.id
        )
    }

    pub fn data_index_url(&self, version: &FullVersionId) -> String {
        format!(
            "{}/{}/{}/{}",
            self.store_url, version.prefix, version.id, DATA_INDEX_FILENAME
        )
    }

    pub fn assets_index_url(&self, assets_index: &str) -> String {
        format!("{}/assets/indexes/{}.json", self.store_url, assets_index)
    }

    pub fn version_jar_url(&self, version: &FullVersionId) -> String {
        format!(
            "{}/{}/{}/{}.jar",
            self.store_url, version.prefix, version.id, version.id
        )
    }

    pub fn version_file_url(&self, version: &FullVersionId, file_name: &str) -> String {
        format!(
            "{}/{}/{}/files/{}",
            self.store_url, version.prefix, version.id, file_name
        )
    }

    pub fn library_url(&self, library_path: &str) -> String {
        format!("{}/libraries/{}", self.store_url, library_path)
    }

    pub fn asset_object_url(&self, storage_name: &str) -> String {
        format!("{}/assets/objects/{}", self.store_url, storage_name)
    }

    pub fn prefix_dir(&self, prefix_id: &str) -> Result<PathBuf> {
        join_relative(self.versions_dir(), prefix_id)
    }

    pub fn version_dir(&self, version: &FullVersionId) -> Result<PathBuf> {
        join_relative(self.prefix_dir(&version.prefix)?, &version.id)
    }

    pub fn version_index_path(&self, version: &FullVersionId) -> Result<PathBuf> {
        Ok(self.version_dir(version)?.join(format!("{}.json", version.id)))
    }

    pub fn data_index_path(&self, version: &FullVersionId) -> Result<PathBuf> {
        Ok(self.version_dir(version)?.join(DATA_INDEX_FILENAME))
    }

    pub fn assets_index_path(&self, assets_index: &str) -> Result<PathBuf> {
        join_relative(
            self.assets_dir().join("indexes"),
            &format!("{}.json", assets_index),
        )
    }

    pub fn version_jar_path(&self, version: &FullVersionId) -> Result<PathBuf> {
        Ok(self.version_dir(version)?.join(format!("{}.jar", version.id)))
    }

    pub fn version_file_path(&self, version: &FullVersionId, file_name: &str) -> Result<PathBuf> {
        join_relative(self.version_dir(version)?.join("files"), file_name)
    }

    pub fn library_file_path(&self, library_path: &str) -> Result<PathBuf> {
        join_relative(self.libraries_dir(), library_path)
    }

    pub fn asset_object_path(&self, storage_name: &str) -> Result<PathBuf> {
        join_relative(self.assets_dir().join("objects"), storage_name)
    }
}

/// Join a store-relative path below `base`.
/// Absolute paths, drive prefixes and `..` are rejected so the result
/// always stays inside `base`.
fn join_relative(base: PathBuf, relative: &str) -> Result<PathBuf> {
    let path = Path::new(relative);
    let has_name = path
        .components()
        .any(|component| matches!(component, Component::Normal(_)));
    let stays_inside = path
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

    if !has_name || !stays_inside {
        return Err(StoreError::Schema(format!(
            "Path '{}' points outside of {:?}",
            relative, base
        )));
    }

    Ok(base.join(path))
}
