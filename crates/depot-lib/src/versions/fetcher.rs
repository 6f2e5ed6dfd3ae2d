//! Remote fetch sequences.
//!
//! Both sequences are strictly sequential: one request in flight at a time,
//! each stage advancing only on success of the previous one. The first
//! failure aborts the rest; whatever was already merged or written is kept.

use super::manager::VersionsManager;
use crate::error::{FetchKind, Result, StoreError};
use crate::models::{FullVersionId, PrefixVersionsIndex, PrefixesIndex, VersionIndex};
use crate::utils::storage::write_file;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;

impl VersionsManager {
    /// Fetch the prefixes index and the version list of every prefix in it.
    ///
    /// Rejected with [`StoreError::AlreadyInProgress`] while another prefixes
    /// fetch runs; a rejected call does not notify the listener.
    pub async fn fetch_prefixes(&self) -> Result<()> {
        let Some(permit) = self.prefixes_gate.try_start() else {
            log::warn!("Failed to start a prefixes fetching! Already in progress!");
            return Err(StoreError::AlreadyInProgress(FetchKind::Prefixes));
        };

        log::info!("Fetching actual prefixes...");
        let result = self.run_prefixes_fetch().await;

        match &result {
            Ok(()) => log::info!("All prefixes are successfully fetched!"),
            Err(e) => log::error!("Failed to fetch prefixes: {}", e),
        }

        drop(permit);
        self.listener.on_fetch_prefixes_result(result.is_ok());
        result
    }

    async fn run_prefixes_fetch(&self) -> Result<()> {
        let remote: PrefixesIndex = self.request_json(&self.config.prefixes_url()).await?;

        let (queue, serialized) = {
            let mut registry = self.registry.write().await;
            let queue = registry.merge_remote_index(remote);
            let serialized = registry.index().to_json_pretty().map_err(|e| {
                StoreError::Schema(format!("Failed to serialize the prefixes index: {}", e))
            })?;
            (queue, serialized)
        };

        write_file(&self.config.prefixes_index_path(), serialized.as_bytes())
            .await
            .inspect_err(|_| log::error!("Failed to save the prefixes index file!"))?;

        let mut queue = VecDeque::from(queue);
        while let Some(prefix_id) = queue.pop_front() {
            let url = self.config.prefix_versions_url(&prefix_id);
            let versions: PrefixVersionsIndex = self.request_json(&url).await.inspect_err(|e| {
                log::error!(
                    "Failed to get the versions index for the prefix '{}': {}",
                    prefix_id,
                    e
                )
            })?;

            self.registry
                .write()
                .await
                .apply_prefix_versions(&prefix_id, versions);
        }

        Ok(())
    }

    /// Fetch the version manifest, assets index and data index of one version.
    ///
    /// Only one version's chain may run at a time, whichever version it is.
    pub async fn fetch_version_indexes(&self, version: &FullVersionId) -> Result<()> {
        let Some(permit) = self.indexes_gate.try_start() else {
            log::warn!("Failed to start a version indexes fetching! Already in progress!");
            return Err(StoreError::AlreadyInProgress(FetchKind::VersionIndexes));
        };

        log::info!("Fetching actual indexes for the '{}'...", version);
        let result = self.run_version_chain(version).await;

        match &result {
            Ok(()) => log::info!("All indexes are successfully fetched!"),
            Err(e) => log::error!("Failed to fetch indexes for the '{}': {}", version, e),
        }

        drop(permit);
        self.listener.on_fetch_version_indexes_result(result.is_ok());
        result
    }

    async fn run_version_chain(&self, version: &FullVersionId) -> Result<()> {
        let assets_index = self.fetch_version_index(version).await?;
        self.fetch_assets_index(version, &assets_index).await?;
        self.fetch_data_index(version).await
    }

    /// Stage 1: the version manifest, yielding its normalized assets reference
    async fn fetch_version_index(&self, version: &FullVersionId) -> Result<String> {
        let path = self.config.version_index_path(version)?;
        let body = self.request(&self.config.version_index_url(version)).await?;
        write_file(&path, &body).await?;

        let version_index: VersionIndex = serde_json::from_slice(&body).map_err(|e| {
            StoreError::Schema(format!("Malformed version index '{}': {}", version, e))
        })?;

        Ok(version_index.assets_index)
    }

    /// Stage 2: the assets index named by the manifest
    async fn fetch_assets_index(&self, version: &FullVersionId, assets_index: &str) -> Result<()> {
        if assets_index.is_empty() {
            return Err(StoreError::Schema(format!(
                "Failed to resolve assets index path for the version '{}'",
                version
            )));
        }

        let path = self.config.assets_index_path(assets_index)?;
        let body = self.request(&self.config.assets_index_url(assets_index)).await?;
        write_file(&path, &body).await
    }

    /// Stage 3: the data index
    async fn fetch_data_index(&self, version: &FullVersionId) -> Result<()> {
        let path = self.config.data_index_path(version)?;
        let body = self.request(&self.config.data_index_url(version)).await?;
        write_file(&path, &body).await
    }

    async fn request(&self, url: &str) -> Result<Vec<u8>> {
        self.transport
            .get(url)
            .await
            .map_err(|source| StoreError::Transport {
                url: url.to_string(),
                source,
            })
    }

    async fn request_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.request(url).await?;
        serde_json::from_slice(&body)
            .map_err(|e| StoreError::Schema(format!("Malformed document '{}': {}", url, e)))
    }
}
