// SPDX-License-Identifier: MIT OR Apache-2.0

//! Preference persistence
//!
//! `PreferenceStore` is a plain string key-value backend. `Preferences`
//! layers typed load/save on top of it; every failure is logged and
//! treated as "nothing stored" so callers fall back to their defaults.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

use crate::codename::Codename;
use crate::errors::PrefError;
use crate::filter::{FilterCriteria, FilterPreset};
use crate::grouping::{SortDirection, SortKey};
use crate::search::SearchHistory;
use crate::snippets::SnippetMap;

pub const KEY_CODENAME_DATA: &str = "codename_data";
pub const KEY_FILTER_STATE: &str = "codename_filter_state";
pub const KEY_FILTER_PRESETS: &str = "codename_filter_presets";
pub const KEY_SEARCH_HISTORY: &str = "search_history";
pub const KEY_ROOT_STATE: &str = "root_state";
pub const KEY_SORT_PREFERENCE: &str = "sort_preference";
pub const KEY_THEME_PREFERENCE: &str = "theme_preference";
pub const KEY_SNIPPET_CACHE: &str = "snippet_cache";

/// Schema version written with the record and snippet snapshots
pub const DATA_VERSION: &str = "1.0.0";

/// Milliseconds since the Unix epoch, 0 if the clock is before it.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Durable string key-value storage
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), PrefError>;
    fn remove(&mut self, key: &str) -> Result<(), PrefError>;
}

/// Process-local store, used for tests and `--no-persist` runs
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PrefError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PrefError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file, rewritten on every change
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file starts empty; a file that
    /// cannot be read or parsed is logged and also starts empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        match Self::try_open(&path) {
            Ok(store) => store,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable preference file");
                Self {
                    path,
                    values: BTreeMap::new(),
                }
            }
        }
    }

    /// Open the store at `path`, reporting read and parse failures.
    /// A missing file is not an error.
    pub fn try_open(path: impl AsRef<Path>) -> Result<Self, PrefError> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    /// Default location under the user's config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cnref").join("prefs.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PrefError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PrefError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), PrefError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Persisted sort order for record lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortPreference {
    pub criteria: SortKey,
    pub direction: SortDirection,
}

#[derive(Serialize, Deserialize)]
struct SnippetSnapshot {
    version: String,
    #[serde(default)]
    data: SnippetMap,
    #[serde(default)]
    timestamp: u64,
}

#[derive(Serialize, Deserialize)]
struct RecordSnapshot {
    version: String,
    data: Option<Vec<Codename>>,
    #[serde(default)]
    timestamp: u64,
}

/// Typed access to a preference store
pub struct Preferences {
    store: Box<dyn PreferenceStore>,
}

impl Preferences {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "discarding malformed stored preference");
                None
            }
        }
    }

    fn save_json<T: Serialize>(&mut self, key: &str, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize preference");
                return false;
            }
        };
        self.save_raw(key, raw)
    }

    fn save_raw(&mut self, key: &str, raw: String) -> bool {
        match self.store.set(key, raw) {
            Ok(()) => {
                debug!(key, "preference saved");
                true
            }
            Err(e) => {
                warn!(key, error = %e, "failed to persist preference");
                false
            }
        }
    }

    /// Stored record snapshot, if any. A version mismatch is logged but the data is still used.
    pub fn load_records(&self) -> Option<Vec<Codename>> {
        let snapshot: RecordSnapshot = self.load_json(KEY_CODENAME_DATA)?;
        if snapshot.version != DATA_VERSION {
            warn!(
                stored = %snapshot.version,
                current = DATA_VERSION,
                "codename data version mismatch"
            );
        }
        snapshot.data
    }

    pub fn save_records(&mut self, records: &[Codename]) -> bool {
        let snapshot = RecordSnapshot {
            version: DATA_VERSION.to_string(),
            data: Some(records.to_vec()),
            timestamp: now_millis(),
        };
        self.save_json(KEY_CODENAME_DATA, &snapshot)
    }

    /// Stored filter criteria merged over `defaults`.
    ///
    /// Only the stored type keys override the defaults, so a partial
    /// snapshot never disables a type it does not mention.
    pub fn load_filter_state(&self, defaults: FilterCriteria) -> FilterCriteria {
        let Some(stored) = self.load_json::<FilterCriteria>(KEY_FILTER_STATE) else {
            return defaults;
        };
        let mut merged = defaults;
        merged.type_filters.extend(stored.type_filters);
        merged.root_filters = stored.root_filters;
        merged.search_text = stored.search_text;
        merged.case_sensitive = stored.case_sensitive;
        merged.whole_word = stored.whole_word;
        merged.active_preset = stored.active_preset;
        merged
    }

    pub fn save_filter_state(&mut self, criteria: &FilterCriteria) -> bool {
        self.save_json(KEY_FILTER_STATE, criteria)
    }

    pub fn load_presets(&self) -> Vec<FilterPreset> {
        self.load_json(KEY_FILTER_PRESETS).unwrap_or_default()
    }

    pub fn save_presets(&mut self, presets: &[FilterPreset]) -> bool {
        self.save_json(KEY_FILTER_PRESETS, &presets)
    }

    pub fn load_history(&self) -> SearchHistory {
        self.load_json::<Vec<String>>(KEY_SEARCH_HISTORY)
            .map(SearchHistory::from_entries)
            .unwrap_or_default()
    }

    pub fn save_history(&mut self, history: &SearchHistory) -> bool {
        self.save_json(KEY_SEARCH_HISTORY, history)
    }

    pub fn load_root_state(&self) -> BTreeMap<String, bool> {
        self.load_json(KEY_ROOT_STATE).unwrap_or_default()
    }

    pub fn save_root_state(&mut self, state: &BTreeMap<String, bool>) -> bool {
        self.save_json(KEY_ROOT_STATE, state)
    }

    pub fn load_sort(&self) -> SortPreference {
        self.load_json(KEY_SORT_PREFERENCE).unwrap_or_default()
    }

    pub fn save_sort(&mut self, sort: SortPreference) -> bool {
        self.save_json(KEY_SORT_PREFERENCE, &sort)
    }

    /// Saved snippets. A snapshot from another schema version is discarded.
    pub fn load_snippets(&self) -> SnippetMap {
        let Some(snapshot) = self.load_json::<SnippetSnapshot>(KEY_SNIPPET_CACHE) else {
            return SnippetMap::new();
        };
        if snapshot.version != DATA_VERSION {
            warn!(
                stored = %snapshot.version,
                current = DATA_VERSION,
                "snippet cache version mismatch, ignoring stored snippets"
            );
            return SnippetMap::new();
        }
        snapshot.data
    }

    pub fn save_snippets(&mut self, snippets: &SnippetMap) -> bool {
        let snapshot = SnippetSnapshot {
            version: DATA_VERSION.to_string(),
            data: snippets.clone(),
            timestamp: now_millis(),
        };
        self.save_json(KEY_SNIPPET_CACHE, &snapshot)
    }

    /// Drop the stored snippets entirely.
    pub fn clear_snippets(&mut self) -> bool {
        match self.store.remove(KEY_SNIPPET_CACHE) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = KEY_SNIPPET_CACHE, error = %e, "failed to clear snippet cache");
                false
            }
        }
    }

    /// The theme is stored as a bare string, not JSON.
    pub fn load_theme(&self) -> Theme {
        self.store
            .get(KEY_THEME_PREFERENCE)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn save_theme(&mut self, theme: Theme) -> bool {
        self.save_raw(KEY_THEME_PREFERENCE, theme.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codename::CodenameType;
    use crate::snippets::Snippet;
    use tempfile::TempDir;

    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), PrefError> {
            Err(PrefError::Unavailable)
        }

        fn remove(&mut self, _key: &str) -> Result<(), PrefError> {
            Err(PrefError::Unavailable)
        }
    }

    fn store_with(key: &str, raw: &str) -> Preferences {
        let mut store = MemoryStore::new();
        store.set(key, raw.to_string()).expect("memory set");
        Preferences::new(Box::new(store))
    }

    #[test]
    fn malformed_json_falls_back_to_default() {
        let prefs = store_with(KEY_ROOT_STATE, "{not json");
        assert!(prefs.load_root_state().is_empty());
        let prefs = store_with(KEY_FILTER_STATE, "[1,2");
        assert_eq!(prefs.load_filter_state(FilterCriteria::default()), FilterCriteria::default());
    }

    #[test]
    fn failed_set_is_reported_not_raised() {
        let mut prefs = Preferences::new(Box::new(FailingStore));
        assert!(!prefs.save_theme(Theme::Dark));
        assert_eq!(prefs.load_theme(), Theme::Light);
    }

    #[test]
    fn partial_type_filters_merge_over_defaults() {
        let prefs = store_with(
            KEY_FILTER_STATE,
            r#"{"type_filters":{"file":false},"root_filters":{"app":false},"search_text":"load"}"#,
        );
        let criteria = prefs.load_filter_state(FilterCriteria::default());
        assert_eq!(criteria.type_filters.get(&CodenameType::File), Some(&false));
        assert_eq!(criteria.type_filters.get(&CodenameType::Function), Some(&true));
        assert_eq!(criteria.root_filters.get("app"), Some(&false));
        assert_eq!(criteria.search_text, "load");
    }

    #[test]
    fn record_snapshot_round_trips() {
        let mut prefs = Preferences::in_memory();
        let records = vec![Codename::new("data_fetch", CodenameType::Function, "Fetches")];
        assert!(prefs.save_records(&records));
        assert_eq!(prefs.load_records(), Some(records));
    }

    #[test]
    fn version_mismatch_still_loads_data() {
        let prefs = store_with(
            KEY_CODENAME_DATA,
            r#"{"version":"0.9.0","data":[{"name":"a_b","type":"event"}]}"#,
        );
        let records = prefs.load_records().expect("records");
        assert_eq!(records[0].root(), "a");
    }

    #[test]
    fn history_sort_and_theme_persist() {
        let mut prefs = Preferences::in_memory();
        let mut history = SearchHistory::default();
        history.record_query("load");
        history.record_query("save");
        assert!(prefs.save_history(&history));
        assert_eq!(prefs.load_history(), history);

        let sort = SortPreference {
            criteria: SortKey::Type,
            direction: SortDirection::Desc,
        };
        prefs.save_sort(sort);
        assert_eq!(prefs.load_sort(), sort);

        prefs.save_theme(Theme::Dark);
        assert_eq!(prefs.load_theme(), Theme::Dark);
    }

    #[test]
    fn snippets_persist_and_clear() {
        let mut prefs = Preferences::in_memory();
        let mut snippets = SnippetMap::new();
        snippets.insert(
            "data_load".to_string(),
            vec![Snippet::new("data_load()", "javascript", "Loads")],
        );
        assert!(prefs.save_snippets(&snippets));
        assert_eq!(prefs.load_snippets(), snippets);

        assert!(prefs.clear_snippets());
        assert!(prefs.load_snippets().is_empty());
        assert!(!Preferences::new(Box::new(FailingStore)).clear_snippets());
    }

    #[test]
    fn snippet_version_mismatch_discards_data() {
        let prefs = store_with(
            KEY_SNIPPET_CACHE,
            r#"{"version":"0.1.0","data":{"a_b":[{"code":"x","language":"text"}]}}"#,
        );
        assert!(prefs.load_snippets().is_empty());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested").join("prefs.json");
        {
            let mut store = FileStore::open(&path);
            store.set(KEY_THEME_PREFERENCE, "dark".to_string()).expect("set");
        }
        let store = FileStore::open(&path);
        assert_eq!(store.get(KEY_THEME_PREFERENCE).as_deref(), Some("dark"));
    }

    #[test]
    fn file_store_ignores_corrupt_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "garbage").expect("write");
        let store = FileStore::open(&path);
        assert_eq!(store.get(KEY_ROOT_STATE), None);
        assert!(matches!(FileStore::try_open(&path), Err(PrefError::Serialization(_))));
    }

    #[test]
    fn file_store_reports_unreadable_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).expect("write");
        assert!(matches!(FileStore::try_open(&path), Err(PrefError::Io(_))));
        assert_eq!(FileStore::open(&path).get(KEY_THEME_PREFERENCE), None);

        let missing = FileStore::try_open(dir.path().join("absent.json")).expect("missing is empty");
        assert_eq!(missing.get(KEY_THEME_PREFERENCE), None);
    }
}
