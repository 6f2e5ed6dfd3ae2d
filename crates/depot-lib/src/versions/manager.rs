use super::gate::FetchGate;
use super::listener::{FetchListener, SilentFetchListener};
use super::registry::{Prefix, VersionRegistry};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::models::{FileInfo, FullVersionId};
use crate::utils::http::{HttpTransport, Transport};
use crate::utils::platform::{HostPlatform, LibraryPlatform};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

/// Entry point of the store: owns the prefix registry, runs the two fetch
/// sequences and resolves download manifests from what was fetched.
pub struct VersionsManager {
    pub(super) config: StoreConfig,
    pub(super) transport: Arc<dyn Transport>,
    pub(super) platform: Arc<dyn LibraryPlatform>,
    pub(super) listener: Arc<dyn FetchListener>,
    pub(super) registry: RwLock<VersionRegistry>,
    pub(super) prefixes_gate: FetchGate,
    pub(super) indexes_gate: FetchGate,
}

impl VersionsManager {
    /// Create the manager and seed the registry from local storage
    pub async fn new(
        config: StoreConfig,
        transport: Arc<dyn Transport>,
        platform: Arc<dyn LibraryPlatform>,
        listener: Arc<dyn FetchListener>,
    ) -> Result<Self> {
        let versions_dir = config.versions_dir();
        fs::create_dir_all(&versions_dir)
            .await
            .map_err(|e| StoreError::storage(&versions_dir, e))?;

        let registry = VersionRegistry::load(&config).await;

        Ok(Self {
            config,
            transport,
            platform,
            listener,
            registry: RwLock::new(registry),
            prefixes_gate: FetchGate::new(),
            indexes_gate: FetchGate::new(),
        })
    }

    /// Manager backed by HTTP, the host platform and no listener
    pub async fn with_http(config: StoreConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.request_timeout).map_err(|source| {
            StoreError::Transport {
                url: config.store_url.clone(),
                source,
            }
        })?;

        Self::new(
            config,
            Arc::new(transport),
            Arc::new(HostPlatform::current()),
            Arc::new(SilentFetchListener),
        )
        .await
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Snapshot of the current prefix map
    pub async fn prefixes(&self) -> HashMap<String, Prefix> {
        self.registry.read().await.prefixes().clone()
    }

    pub async fn prefix(&self, id: &str) -> Option<Prefix> {
        self.registry.read().await.prefix(id).cloned()
    }

    pub fn is_fetching_prefixes(&self) -> bool {
        self.prefixes_gate.is_busy()
    }

    pub fn is_fetching_version_indexes(&self) -> bool {
        self.indexes_gate.is_busy()
    }

    /// Build the download list of a version from the indexes on disk
    pub async fn resolve_download_manifest(&self, version: &FullVersionId) -> Result<Vec<FileInfo>> {
        super::resolver::resolve_download_manifest(&self.config, self.platform.as_ref(), version)
            .await
    }
}
