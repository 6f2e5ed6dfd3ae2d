pub mod assets_index;
pub mod common;
pub mod data_index;
pub mod prefixes;
pub mod version_index;

pub use assets_index::{AssetObject, AssetsIndex};
pub use common::{CheckInfo, FileInfo, FullVersionId};
pub use data_index::DataIndex;
pub use prefixes::{PrefixInfo, PrefixVersionsIndex, PrefixesIndex};
pub use version_index::{LibraryInfo, OsRule, Rule, RuleAction, VersionIndex};
