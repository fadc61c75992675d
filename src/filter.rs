// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compound filter predicate over codename collections
//!
//! A record passes when it clears three gates in order: type, root, text.
//! The type gate is default-deny (a type missing from `type_filters`
//! fails) while the root gate is default-allow (only an explicit `false`
//! fails). Presets capture and restore a criteria snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

use crate::codename::{Codename, CodenameType};

/// Filter configuration applied to a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub type_filters: BTreeMap<CodenameType, bool>,
    pub root_filters: BTreeMap<String, bool>,
    pub search_text: String,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub active_preset: Option<u64>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            type_filters: CodenameType::ALL.iter().map(|t| (*t, true)).collect(),
            root_filters: BTreeMap::new(),
            search_text: String::new(),
            case_sensitive: false,
            whole_word: false,
            active_preset: None,
        }
    }
}

impl FilterCriteria {
    /// Criteria with no type enabled. Use `enable_type` to opt in.
    pub fn no_types() -> Self {
        Self {
            type_filters: BTreeMap::new(),
            ..Self::default()
        }
    }

    pub fn enable_type(&mut self, kind: CodenameType) {
        self.type_filters.insert(kind, true);
    }

    pub fn toggle_type(&mut self, kind: CodenameType) -> bool {
        let entry = self.type_filters.entry(kind).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Flip a root filter. Absent roots count as enabled, so the first toggle disables.
    pub fn toggle_root(&mut self, root: &str) -> bool {
        let entry = self.root_filters.entry(root.to_string()).or_insert(true);
        *entry = !*entry;
        *entry
    }

    pub fn set_root(&mut self, root: &str, enabled: bool) {
        self.root_filters.insert(root.to_string(), enabled);
    }

    /// Register known roots as enabled unless already set.
    pub fn ensure_roots<'a>(&mut self, roots: impl IntoIterator<Item = &'a str>) {
        for root in roots {
            self.root_filters.entry(root.to_string()).or_insert(true);
        }
    }

    /// Re-enable every type and every known root, clear the text and active preset.
    pub fn reset(&mut self) {
        for kind in CodenameType::ALL {
            self.type_filters.insert(kind, true);
        }
        for enabled in self.root_filters.values_mut() {
            *enabled = true;
        }
        self.search_text.clear();
        self.active_preset = None;
    }

    /// Deterministic key for memoizing results of these criteria.
    pub fn cache_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn apply_preset(&mut self, preset: &FilterPreset) {
        self.type_filters = preset.type_filters.clone();
        self.root_filters = preset.root_filters.clone();
        self.search_text = preset.search_text.clone();
        self.active_preset = Some(preset.id);
    }

    fn passes(&self, cn: &Codename, needle: &str) -> bool {
        if !self.type_filters.get(&cn.kind()).copied().unwrap_or(false) {
            return false;
        }

        if !cn.root().is_empty() && self.root_filters.get(cn.root()) == Some(&false) {
            return false;
        }

        if needle.is_empty() {
            return true;
        }

        if self.whole_word {
            return cn.terms().iter().any(|term| self.fold(term) == needle);
        }

        self.fold(cn.name()).contains(needle) || self.fold(cn.description()).contains(needle)
    }

    fn fold(&self, text: &str) -> String {
        if self.case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        }
    }
}

/// A named snapshot of filter criteria
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPreset {
    pub id: u64,
    pub name: String,
    pub type_filters: BTreeMap<CodenameType, bool>,
    pub root_filters: BTreeMap<String, bool>,
    pub search_text: String,
}

impl FilterPreset {
    /// Snapshot `criteria` under a trimmed name. Blank names are rejected.
    pub fn capture(id: u64, name: &str, criteria: &FilterCriteria) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            id,
            name: name.to_string(),
            type_filters: criteria.type_filters.clone(),
            root_filters: criteria.root_filters.clone(),
            search_text: criteria.search_text.clone(),
        })
    }
}

/// Keep the records that pass `criteria`, preserving input order.
pub fn apply_filters(records: &[Codename], criteria: &FilterCriteria) -> Vec<Codename> {
    let started = Instant::now();
    let needle = criteria.fold(&criteria.search_text);

    let filtered: Vec<Codename> = records
        .iter()
        .filter(|cn| criteria.passes(cn, &needle))
        .cloned()
        .collect();

    debug!(
        input = records.len(),
        matched = filtered.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "filter applied"
    );
    filtered
}
