//! Key-value persistence of the two small records: progress and settings.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const PROGRESS_KEY: &str = "progress";
pub const SETTINGS_KEY: &str = "settings";

/// The persisted `progress` record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub max_unlocked_level: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            max_unlocked_level: 1,
        }
    }
}

fn record_path(key: &str) -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("numberrush")
        .join(format!("{}.json", key))
}

/// Load a record, falling back to its defaults when the file is missing or
/// unreadable.
pub fn load_record<T: DeserializeOwned + Default>(key: &str) -> T {
    match fs::read_to_string(record_path(key)) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Best-effort save. Persistence failures never interrupt play.
pub fn save_record<T: Serialize>(key: &str, value: &T) {
    let path = record_path(key);
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(json) = serde_json::to_string_pretty(value) {
        let _ = fs::write(path, json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_defaults_to_first_level() {
        assert_eq!(Progress::default().max_unlocked_level, 1);
    }

    #[test]
    fn test_progress_merges_over_defaults() {
        let loaded: Progress = serde_json::from_str("{}").unwrap();
        assert_eq!(loaded.max_unlocked_level, 1);
        let loaded: Progress = serde_json::from_str(r#"{"max_unlocked_level":7}"#).unwrap();
        assert_eq!(loaded.max_unlocked_level, 7);
    }

    #[test]
    fn test_record_paths_are_distinct() {
        assert_ne!(record_path(PROGRESS_KEY), record_path(SETTINGS_KEY));
        assert!(record_path(PROGRESS_KEY).ends_with("numberrush/progress.json"));
    }
}
