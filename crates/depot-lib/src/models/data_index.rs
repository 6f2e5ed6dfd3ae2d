use super::common::CheckInfo;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-version hash/size catalogue. This is the integrity source for the main
/// archive, auxiliary files and libraries; the version manifest only decides
/// which libraries are wanted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataIndex {
    /// The version's primary archive
    pub main: CheckInfo,

    /// Auxiliary files keyed by relative file name, in stored order
    #[serde(default)]
    pub files: IndexMap<String, CheckInfo>,

    /// Libraries keyed by storage path
    #[serde(default)]
    pub libs: IndexMap<String, CheckInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_stored_file_order() {
        let index: DataIndex = serde_json::from_str(
            r#"{
                "main": { "hash": "A", "size": 10 },
                "files": {
                    "zeta.txt": { "hash": "Z", "size": 1 },
                    "alpha.txt": { "hash": "B", "size": 2 },
                    "mods/core.jar": { "hash": "C", "size": 3 }
                }
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = index.files.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta.txt", "alpha.txt", "mods/core.jar"]);
        assert!(index.libs.is_empty());
        assert_eq!(index.main.size, 10);
    }

    #[test]
    fn main_entry_is_required() {
        let result = serde_json::from_value::<DataIndex>(json!({ "files": {} }));
        assert!(result.is_err());
    }
}
