// SPDX-License-Identifier: MIT OR Apache-2.0

//! Codename service: the working set plus memoized lookups
//!
//! Constructed once by the application and passed by reference. Lookups
//! initialize lazily with the default catalog when `initialize` has not
//! been called.

use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

use crate::cache::LookupCache;
use crate::catalog::default_catalog;
use crate::codename::{Codename, CodenameType};
use crate::filter::{apply_filters, FilterCriteria};
use crate::grouping::{group_by_root, sort_records, RootGroups, SortDirection, SortKey};
use crate::prefs::{now_millis, Preferences};
use crate::search::{search, SearchOptions};
use crate::snippets::{Snippet, SnippetLibrary, SnippetMap};
use crate::terms::{related_terms, term_frequency, RelatedTerm};

pub struct CodenameService {
    prefs: Preferences,
    initialized: bool,
    records: Vec<Codename>,
    root_state: BTreeMap<String, bool>,
    snippets: SnippetLibrary,
    cache: LookupCache,
}

impl CodenameService {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs,
            initialized: false,
            records: Vec::new(),
            root_state: BTreeMap::new(),
            snippets: SnippetLibrary::default(),
            cache: LookupCache::new(),
        }
    }

    /// Load the working set. Calling again after success is a no-op.
    ///
    /// The persisted snapshot wins over `initial`, which wins over the
    /// built-in catalog.
    pub fn initialize(&mut self, initial: Option<Vec<Codename>>) -> bool {
        if self.initialized {
            return true;
        }

        let source = self
            .prefs
            .load_records()
            .or(initial)
            .unwrap_or_else(|| default_catalog().to_vec());
        self.records = dedup_records(source);
        self.root_state = self.prefs.load_root_state();
        self.snippets = SnippetLibrary::new(self.prefs.load_snippets());
        self.cache.clear();
        self.initialized = true;

        info!(records = self.records.len(), "codename data initialized");
        true
    }

    fn ensure_initialized(&mut self) {
        if !self.initialized {
            self.initialize(None);
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn prefs_mut(&mut self) -> &mut Preferences {
        &mut self.prefs
    }

    pub fn all(&mut self) -> Vec<Codename> {
        self.ensure_initialized();
        self.records.clone()
    }

    pub fn by_type(&mut self, kind: CodenameType) -> Vec<Codename> {
        self.ensure_initialized();
        let records = &self.records;
        self.cache.by_type(kind, || {
            records.iter().filter(|cn| cn.kind() == kind).cloned().collect()
        })
    }

    /// Root groups with persisted expansion state applied.
    pub fn by_root(&mut self) -> RootGroups {
        self.ensure_initialized();
        let records = &self.records;
        let mut groups = self.cache.by_root(|| group_by_root(records));
        groups.apply_expansion(&self.root_state);
        groups
    }

    pub fn search(&mut self, query: &str, options: SearchOptions) -> Vec<Codename> {
        self.ensure_initialized();
        if query.is_empty() {
            return Vec::new();
        }
        let records = &self.records;
        self.cache
            .search(options.cache_key(query), || search(records, query, options))
    }

    pub fn filter(&mut self, criteria: &FilterCriteria) -> Vec<Codename> {
        self.ensure_initialized();
        let records = &self.records;
        self.cache
            .filtered(criteria.cache_key(), || apply_filters(records, criteria))
    }

    pub fn sort(&self, records: &[Codename], key: SortKey, direction: SortDirection) -> Vec<Codename> {
        sort_records(records, key, direction)
    }

    pub fn term_frequency(&mut self) -> BTreeMap<String, usize> {
        self.ensure_initialized();
        term_frequency(&self.records)
    }

    pub fn related_terms(&mut self, term: &str) -> Vec<RelatedTerm> {
        self.ensure_initialized();
        related_terms(&self.records, term)
    }

    pub fn root_state(&self) -> &BTreeMap<String, bool> {
        &self.root_state
    }

    /// Record and persist a root group's expansion flag.
    pub fn set_root_expanded(&mut self, root: &str, expanded: bool) {
        if root.is_empty() {
            return;
        }
        self.ensure_initialized();
        self.root_state.insert(root.to_string(), expanded);
        self.prefs.save_root_state(&self.root_state);
        debug!(root, expanded, "root state updated");
    }

    /// Snippets for a codename: saved, built-in, or a generated placeholder.
    pub fn snippets(&mut self, codename: &str) -> Vec<Snippet> {
        self.ensure_initialized();
        self.snippets.lookup(codename)
    }

    /// Save a snippet for `codename` and persist all saved snippets.
    pub fn save_snippet(&mut self, codename: &str, snippet: Snippet) -> bool {
        self.ensure_initialized();
        if !self.snippets.add(codename, snippet, now_millis()) {
            return false;
        }
        self.prefs.save_snippets(self.snippets.saved())
    }

    pub fn search_snippets(&mut self, query: &str) -> SnippetMap {
        self.ensure_initialized();
        self.snippets.search(query)
    }

    pub fn clear_snippets(&mut self) -> bool {
        self.ensure_initialized();
        self.snippets.clear();
        self.prefs.clear_snippets()
    }

    /// Replace the working set and persist it as the new snapshot.
    pub fn replace_records(&mut self, records: Vec<Codename>) -> bool {
        self.records = dedup_records(records);
        self.initialized = true;
        self.cache.clear();
        self.prefs.save_records(&self.records)
    }
}

/// Drop later duplicates of the same `(type, name)` pair.
fn dedup_records(records: Vec<Codename>) -> Vec<Codename> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|cn| {
            let fresh = seen.insert((cn.kind(), cn.name().to_string()));
            if !fresh {
                warn!(name = cn.name(), kind = %cn.kind(), "dropping duplicate codename");
            }
            fresh
        })
        .collect()
}
