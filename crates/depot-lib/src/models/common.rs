use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Compound key identifying exactly one version manifest
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Debug)]
pub struct FullVersionId {
    pub prefix: String,
    pub id: String,
}

impl FullVersionId {
    pub fn new(prefix: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for FullVersionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.prefix, self.id)
    }
}

impl FromStr for FullVersionId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((prefix, id)) if !prefix.is_empty() && !id.is_empty() && !id.contains('/') => {
                Ok(FullVersionId::new(prefix, id))
            }
            _ => Err(anyhow::anyhow!("Invalid full version id: {}", s)),
        }
    }
}

/// Expected hash and size of a single file
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct CheckInfo {
    pub hash: String,
    pub size: u64,
}

/// A resolved, ready-to-download unit
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct FileInfo {
    pub url: String,
    pub path: PathBuf,
    pub hash: String,
    pub size: u64,
}

impl FileInfo {
    pub fn new(url: String, path: PathBuf, hash: String, size: u64) -> Self {
        Self {
            url,
            path,
            hash,
            size,
        }
    }

    pub fn from_check_info(url: String, path: PathBuf, check: &CheckInfo) -> Self {
        Self::new(url, path, check.hash.clone(), check.size)
    }
}
