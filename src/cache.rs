// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memoized lookups over the working set
//!
//! Entries are keyed by a deterministic serialization of the lookup
//! parameters and are only ever dropped all at once.

use std::collections::HashMap;

use crate::codename::{Codename, CodenameType};
use crate::grouping::RootGroups;

#[derive(Debug, Default)]
pub struct LookupCache {
    by_type: HashMap<CodenameType, Vec<Codename>>,
    by_root: Option<RootGroups>,
    search_results: HashMap<String, Vec<Codename>>,
    filtered_results: HashMap<String, Vec<Codename>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.by_type.clear();
        self.by_root = None;
        self.search_results.clear();
        self.filtered_results.clear();
    }

    pub fn by_type(&mut self, kind: CodenameType, compute: impl FnOnce() -> Vec<Codename>) -> Vec<Codename> {
        self.by_type.entry(kind).or_insert_with(compute).clone()
    }

    pub fn by_root(&mut self, compute: impl FnOnce() -> RootGroups) -> RootGroups {
        self.by_root.get_or_insert_with(compute).clone()
    }

    pub fn search(&mut self, key: String, compute: impl FnOnce() -> Vec<Codename>) -> Vec<Codename> {
        self.search_results.entry(key).or_insert_with(compute).clone()
    }

    pub fn filtered(&mut self, key: String, compute: impl FnOnce() -> Vec<Codename>) -> Vec<Codename> {
        self.filtered_results.entry(key).or_insert_with(compute).clone()
    }

    /// Total number of memoized entries.
    pub fn len(&self) -> usize {
        self.by_type.len()
            + usize::from(self.by_root.is_some())
            + self.search_results.len()
            + self.filtered_results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_once_per_key() {
        let mut cache = LookupCache::new();
        let mut calls = 0;
        for _ in 0..3 {
            cache.search("app_{}".to_string(), || {
                calls += 1;
                Vec::new()
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let mut cache = LookupCache::new();
        cache.by_type(CodenameType::File, Vec::new);
        cache.by_root(RootGroups::default);
        cache.filtered("{}".to_string(), Vec::new);
        assert_eq!(cache.len(), 3);
        cache.clear();
        assert!(cache.is_empty());
    }
}
