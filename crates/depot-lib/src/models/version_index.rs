//! Version manifest parser.
//!
//! Two schema generations exist on the store. Older manifests carry a bare
//! `assets` string and a space-delimited `minecraftArguments` string; newer
//! ones carry an `assetIndex` object and an `arguments.game` array. Both are
//! normalized into [`VersionIndex`] at parse time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalized version manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawVersionIndex")]
pub struct VersionIndex {
    pub id: String,

    /// `None` when the manifest has no parseable release time
    pub release_time: Option<DateTime<Utc>>,

    /// Reference of the assets index document; empty when unresolvable
    pub assets_index: String,

    pub libraries: Vec<LibraryInfo>,

    pub main_class: String,

    pub game_arguments: Vec<String>,
}

/// Library descriptor as listed by the version manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryInfo {
    /// Maven coordinates
    pub name: String,

    /// Rules for conditional inclusion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,

    /// Native classifiers keyed by OS name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natives: Option<HashMap<String, String>>,
}

/// Rule for conditional libraries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub action: RuleAction,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<OsRule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Disallow,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OsRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
}

// Wire shape of both schema generations

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVersionIndex {
    #[serde(default)]
    id: String,

    #[serde(default)]
    release_time: Option<String>,

    #[serde(default)]
    asset_index: Option<AssetDownloadInfo>,

    #[serde(default)]
    assets: Option<String>,

    #[serde(default)]
    libraries: Vec<LibraryInfo>,

    #[serde(default)]
    main_class: Option<String>,

    #[serde(default)]
    arguments: Option<RawArguments>,

    #[serde(default)]
    minecraft_arguments: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssetDownloadInfo {
    #[serde(default)]
    id: String,

    #[serde(default)]
    sha1: String,
}

#[derive(Debug, Deserialize)]
struct RawArguments {
    /// Plain strings and conditional rule objects, mixed
    #[serde(default)]
    game: Vec<serde_json::Value>,
}

impl From<RawVersionIndex> for VersionIndex {
    fn from(raw: RawVersionIndex) -> Self {
        let assets_index = match raw.asset_index {
            Some(info) if !info.sha1.is_empty() && !info.id.is_empty() => {
                format!("{}/{}", info.sha1, info.id)
            }
            Some(_) => String::new(),
            None => raw.assets.unwrap_or_default(),
        };

        let game_arguments = match raw.arguments {
            Some(arguments) => arguments
                .game
                .into_iter()
                .filter_map(|token| match token {
                    serde_json::Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            None => raw
                .minecraft_arguments
                .as_deref()
                .unwrap_or_default()
                // Runs of spaces never produce empty tokens
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        };

        let release_time = raw.release_time.as_deref().and_then(|time| {
            DateTime::parse_from_rfc3339(time)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
        });

        VersionIndex {
            id: raw.id,
            release_time,
            assets_index,
            libraries: raw.libraries,
            main_class: raw.main_class.unwrap_or_default(),
            game_arguments,
        }
    }
}
