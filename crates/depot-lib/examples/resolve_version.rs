use std::sync::Arc;

use anyhow::{Context, Result};

use depot_lib::utils::{HostPlatform, HttpTransport};
use depot_lib::{FetchListener, FullVersionId, StoreConfig, VersionsManager};

struct ConsoleListener;

impl FetchListener for ConsoleListener {
    fn on_fetch_prefixes_result(&self, success: bool) {
        println!("[PREFIXES] success={}", success);
    }

    fn on_fetch_version_indexes_result(&self, success: bool) {
        println!("[INDEXES] success={}", success);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Usage: resolve_version [prefix/version]
    let requested = std::env::args().nth(1);

    let tmp = tempfile::tempdir()?;
    let config = StoreConfig::from_env(tmp.path())
        .context("DEPOT_STORE_URL must point at a content store")?;

    let transport = HttpTransport::new(config.request_timeout)?;
    let manager = VersionsManager::new(
        config,
        Arc::new(transport),
        Arc::new(HostPlatform::current()),
        Arc::new(ConsoleListener),
    )
    .await?;

    manager.fetch_prefixes().await?;

    let version = match requested {
        Some(raw) => raw.parse::<FullVersionId>()?,
        None => {
            let prefixes = manager.prefixes().await;
            let prefix = prefixes
                .values()
                .find(|p| p.latest_version_id.is_some() || !p.versions.is_empty())
                .context("The store lists no versions")?;
            let id = prefix
                .latest_version_id
                .clone()
                .or_else(|| prefix.versions.first().cloned())
                .context("The store lists no versions")?;
            FullVersionId::new(prefix.id.clone(), id)
        }
    };

    println!("Fetching indexes for {}", version);
    manager.fetch_version_indexes(&version).await?;

    let files = manager.resolve_download_manifest(&version).await?;
    let total: u64 = files.iter().map(|f| f.size).sum();
    println!("{} files to check, {} bytes total", files.len(), total);

    for file in files.iter().take(10) {
        println!("  {} -> {}", file.url, file.path.display());
    }

    Ok(())
}
