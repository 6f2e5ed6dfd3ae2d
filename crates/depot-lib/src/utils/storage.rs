//! Thin filesystem helpers. Writes are not atomic; a crash mid-write can
//! leave a truncated file behind.

use crate::error::{Result, StoreError};
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs;

/// Write a file, creating its parent directory first
pub async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::storage(parent, e))?;
    }

    fs::write(path, contents)
        .await
        .map_err(|e| StoreError::storage(path, e))?;

    log::debug!("Saved {:?} ({} bytes)", path, contents.len());
    Ok(())
}

/// Read and parse a JSON document
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read(path)
        .await
        .map_err(|e| StoreError::storage(path, e))?;

    serde_json::from_slice(&contents).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrefixesIndex;

    #[tokio::test]
    async fn write_creates_missing_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("release").join("1.12.2").join("data.json");

        write_file(&path, b"{}").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
    }

    #[tokio::test]
    async fn missing_file_is_a_storage_error() {
        let tmp = tempfile::tempdir().unwrap();
        let result = read_json::<PrefixesIndex>(&tmp.path().join("prefixes.json")).await;

        assert!(matches!(result, Err(StoreError::Storage { .. })));
    }

    #[tokio::test]
    async fn malformed_file_is_a_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("prefixes.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = read_json::<PrefixesIndex>(&path).await;

        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }
}
