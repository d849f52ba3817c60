//! Persisted filter preferences
//!
//! Exactly the filter subset of store state survives restarts:
//! `{selectedTypes, selectedSource, messageQuery}`. Events, metadata, sources,
//! and the detail selection are session-only and never written. The type set
//! crosses the serialization boundary as an ordered list of type names.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{DeckResult, EventType};
use crate::utils::atomic::atomic_write;

/// The persisted slice of store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPrefs {
    #[serde(
        rename = "selectedTypes",
        default = "all_types",
        serialize_with = "types_as_list",
        deserialize_with = "types_from_list"
    )]
    pub selected_types: HashSet<EventType>,
    #[serde(rename = "selectedSource", default)]
    pub selected_source: Option<String>,
    #[serde(rename = "messageQuery", default)]
    pub message_query: String,
}

impl Default for FilterPrefs {
    fn default() -> Self {
        Self {
            selected_types: all_types(),
            selected_source: None,
            message_query: String::new(),
        }
    }
}

fn all_types() -> HashSet<EventType> {
    EventType::ALL.into_iter().collect()
}

/// Sets serialize as ordered lists so the blob is stable across runs
fn types_as_list<S: Serializer>(types: &HashSet<EventType>, serializer: S) -> Result<S::Ok, S::Error> {
    let mut list: Vec<EventType> = types.iter().copied().collect();
    list.sort();
    list.serialize(serializer)
}

fn types_from_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<HashSet<EventType>, D::Error> {
    let list = Vec::<EventType>::deserialize(deserializer)?;
    Ok(list.into_iter().collect())
}

/// Load preferences from `path`.
///
/// A missing, unreadable, or corrupt file is treated as absent: defaults apply
/// and nothing is propagated.
pub fn load(path: &Path) -> FilterPrefs {
    if !path.exists() {
        return FilterPrefs::default();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable prefs file, using defaults");
            return FilterPrefs::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(prefs) => prefs,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt prefs file, using defaults");
            FilterPrefs::default()
        }
    }
}

/// Atomically write preferences to `path`
pub fn save(path: &Path, prefs: &FilterPrefs) -> DeckResult<()> {
    let content = serde_json::to_string_pretty(prefs)?;
    atomic_write(path, &content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_preserves_set_membership() {
        let prefs = FilterPrefs {
            selected_types: [EventType::Info, EventType::Error].into_iter().collect(),
            selected_source: Some("api".to_string()),
            message_query: "q".to_string(),
        };

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");

        save(&path, &prefs).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_type_set_serializes_as_ordered_list() {
        let prefs = FilterPrefs::default();
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains(r#"["info","warning","error"]"#));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = load(&temp_dir.path().join("absent.json"));
        assert_eq!(loaded, FilterPrefs::default());
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();

        let loaded = load(&path);
        assert_eq!(loaded, FilterPrefs::default());
    }
}
