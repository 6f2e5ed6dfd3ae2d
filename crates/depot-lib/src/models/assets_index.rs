use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Catalogue of content-addressed asset objects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsIndex {
    /// Logical name -> object, in stored order. Names are informational only.
    pub objects: IndexMap<String, AssetObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetObject {
    pub hash: String,
    pub size: u64,
}

impl AssetObject {
    /// Storage name derived from the hash: `<first two chars>/<hash>`
    pub fn storage_name(&self) -> String {
        let shard: String = self.hash.chars().take(2).collect();
        format!("{}/{}", shard, self.hash)
    }
}
