use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root document listing which prefixes exist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrefixesIndex {
    #[serde(default)]
    pub prefixes: IndexMap<String, PrefixInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixInfo {
    /// Human-readable description
    #[serde(default)]
    pub about: String,
}

/// Per-prefix version list published by the store
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrefixVersionsIndex {
    #[serde(default)]
    pub latest: String,

    #[serde(default)]
    pub versions: Vec<String>,
}

impl PrefixesIndex {
    /// Merge a remote index into this one, remote entries winning per key.
    /// Returns the remote prefix ids in their stored order.
    pub fn merge(&mut self, remote: PrefixesIndex) -> Vec<String> {
        let mut merged = Vec::with_capacity(remote.prefixes.len());

        for (id, info) in remote.prefixes {
            merged.push(id.clone());
            self.prefixes.insert(id, info);
        }

        merged
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
