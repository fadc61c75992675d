// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-text codename search, query history and match highlighting

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

use crate::codename::Codename;

/// Maximum number of remembered queries
pub const HISTORY_LIMIT: usize = 10;
/// Maximum number of suggestions offered for a prefix
pub const SUGGESTION_LIMIT: usize = 5;
/// Default number of results per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const HIGHLIGHT_OPEN: &str = "<mark>";
pub const HIGHLIGHT_CLOSE: &str = "</mark>";

/// Matching modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub whole_word: bool,
}

impl SearchOptions {
    /// Memoization key for `query` under these options.
    pub fn cache_key(&self, query: &str) -> String {
        let normalized = if self.case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        };
        format!(
            "{}_{}",
            normalized,
            serde_json::to_string(self).unwrap_or_default()
        )
    }
}

/// Records whose name contains `query`, or with `whole_word` whose terms include it.
///
/// An empty query matches nothing.
pub fn search(records: &[Codename], query: &str, options: SearchOptions) -> Vec<Codename> {
    if query.is_empty() {
        return Vec::new();
    }

    let fold = |s: &str| {
        if options.case_sensitive {
            s.to_string()
        } else {
            s.to_lowercase()
        }
    };
    let needle = fold(query);

    let results: Vec<Codename> = records
        .iter()
        .filter(|cn| {
            if options.whole_word {
                cn.terms().iter().any(|term| fold(term) == needle)
            } else {
                fold(cn.name()).contains(&needle)
            }
        })
        .cloned()
        .collect();

    debug!(query, matched = results.len(), "search executed");
    results
}

/// Wrap the first case-insensitive occurrence of `query` in `<mark>` tags.
pub fn highlight(text: &str, query: &str) -> String {
    highlight_with(text, query, HIGHLIGHT_OPEN, HIGHLIGHT_CLOSE)
}

/// Wrap the first case-insensitive occurrence of `query` in custom markers.
pub fn highlight_with(text: &str, query: &str, open: &str, close: &str) -> String {
    match match_range(text, query) {
        Some((start, end)) => {
            let mut out = String::with_capacity(text.len() + open.len() + close.len());
            out.push_str(&text[..start]);
            out.push_str(open);
            out.push_str(&text[start..end]);
            out.push_str(close);
            out.push_str(&text[end..]);
            out
        }
        None => text.to_string(),
    }
}

/// Byte range in `text` of the first match of `query`, ignoring case.
///
/// Compares char by char so multi-byte input never splits a code point.
pub fn match_range(text: &str, query: &str) -> Option<(usize, usize)> {
    if query.is_empty() || text.is_empty() {
        return None;
    }
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();

    for (start, _) in text.char_indices() {
        let mut pending = needle.iter();
        'scan: for (offset, ch) in text[start..].char_indices() {
            for lowered in ch.to_lowercase() {
                match pending.next() {
                    Some(expected) if *expected == lowered => {}
                    _ => break 'scan,
                }
            }
            if pending.len() == 0 {
                return Some((start, start + offset + ch.len_utf8()));
            }
        }
    }
    None
}

/// Most-recent-first list of submitted queries, deduplicated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: VecDeque<String>,
}

impl SearchHistory {
    /// Build from stored entries, keeping the first occurrence of each and the limit.
    pub fn from_entries(entries: impl IntoIterator<Item = String>) -> Self {
        let mut history = Self::default();
        for entry in entries {
            if !entry.is_empty() && !history.entries.contains(&entry) {
                history.entries.push_back(entry);
            }
        }
        history.entries.truncate(HISTORY_LIMIT);
        history
    }

    /// Move `query` to the front, dropping the oldest past the limit.
    pub fn record_query(&mut self, query: &str) {
        if query.is_empty() {
            return;
        }
        self.entries.retain(|existing| existing != query);
        self.entries.push_front(query.to_string());
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Recent queries containing `query`, ignoring case, newest first.
    pub fn get_suggestions(&self, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.to_lowercase().contains(&needle))
            .take(SUGGESTION_LIMIT)
            .cloned()
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Current query, results and pagination
#[derive(Debug, Clone)]
pub struct SearchState {
    pub query: String,
    pub options: SearchOptions,
    pub history: SearchHistory,
    pub results: Vec<Codename>,
    page: usize,
    page_size: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(SearchHistory::default(), DEFAULT_PAGE_SIZE)
    }
}

impl SearchState {
    pub fn new(history: SearchHistory, page_size: usize) -> Self {
        Self {
            query: String::new(),
            options: SearchOptions::default(),
            history,
            results: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Take the results of `query` and remember it when it is non-empty.
    pub fn accept(&mut self, query: &str, options: SearchOptions, results: Vec<Codename>) -> &[Codename] {
        self.query = query.to_string();
        self.options = options;
        self.results = results;
        self.history.record_query(query);
        self.clamp_page();
        &self.results
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages, at least one.
    pub fn total_pages(&self) -> usize {
        self.results.len().div_ceil(self.page_size).max(1)
    }

    /// Jump to `page`, clamped into range.
    pub fn go_to(&mut self, page: usize) {
        self.page = page;
        self.clamp_page();
    }

    /// Results on the current page.
    pub fn page_items(&self) -> &[Codename] {
        let start = (self.page - 1) * self.page_size;
        if start >= self.results.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.results.len());
        &self.results[start..end]
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages());
    }
}
