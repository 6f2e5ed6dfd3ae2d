use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::models::{AssetsIndex, DataIndex, FileInfo, FullVersionId, VersionIndex};
use crate::utils::platform::LibraryPlatform;
use crate::utils::storage::read_json;

/// Cross-reference the data, version and assets indexes stored on disk into
/// one ordered download list: main archive, auxiliary files, libraries, then
/// assets, each group in its document's stored order. No network access.
///
/// Entries are not deduplicated across groups. A document entry whose
/// destination would land outside the data directory fails the whole
/// resolution with [`StoreError::Schema`].
pub async fn resolve_download_manifest(
    config: &StoreConfig,
    platform: &dyn LibraryPlatform,
    version: &FullVersionId,
) -> Result<Vec<FileInfo>> {
    log::info!("Collecting files for the version '{}'...", version);

    let data_index: DataIndex = read_json(&config.data_index_path(version)?)
        .await
        .inspect_err(|e| log::error!("Failed to load data index: {}", e))?;

    let mut files = Vec::with_capacity(1 + data_index.files.len() + data_index.libs.len());

    files.push(FileInfo::from_check_info(
        config.version_jar_url(version),
        config.version_jar_path(version)?,
        &data_index.main,
    ));

    for (file_name, check) in &data_index.files {
        files.push(FileInfo::from_check_info(
            config.version_file_url(version, file_name),
            config.version_file_path(version, file_name)?,
            check,
        ));
    }

    let version_index: VersionIndex = read_json(&config.version_index_path(version)?)
        .await
        .inspect_err(|e| log::error!("Failed to load version index: {}", e))?;

    for library in &version_index.libraries {
        if !platform.is_library_allowed(library) {
            continue;
        }

        let library_path = platform.library_path(library);
        let Some(check) = data_index.libs.get(&library_path) else {
            log::warn!("Library '{}' is missing in the data index", library_path);
            continue;
        };

        files.push(FileInfo::from_check_info(
            config.library_url(&library_path),
            config.library_file_path(&library_path)?,
            check,
        ));
    }

    if version_index.assets_index.is_empty() {
        return Err(StoreError::Schema(format!(
            "Failed to resolve assets index path for the version '{}'",
            version
        )));
    }

    let assets_index_path = config.assets_index_path(&version_index.assets_index)?;
    let assets_index: AssetsIndex = read_json(&assets_index_path)
        .await
        .inspect_err(|e| log::error!("Failed to load assets index: {}", e))?;

    files.reserve(assets_index.objects.len());
    for asset in assets_index.objects.values() {
        let storage_name = asset.storage_name();
        files.push(FileInfo::new(
            config.asset_object_url(&storage_name),
            config.asset_object_path(&storage_name)?,
            asset.hash.clone(),
            asset.size,
        ));
    }

    log::info!("Need to check {} files", files.len());
    Ok(files)
}
