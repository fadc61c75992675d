// SPDX-License-Identifier: MIT OR Apache-2.0

//! cnref - Codename reference library
//!
//! Groups, filters and searches a naming-convention taxonomy. The engines
//! are pure functions over record slices; `CodenameService` ties them to a
//! working set and a preference store.

pub mod cache;
pub mod catalog;
pub mod codename;
pub mod config;
pub mod errors;
pub mod filter;
pub mod grouping;
pub mod prefs;
pub mod search;
pub mod service;
pub mod snippets;
pub mod terms;

pub use codename::{extract_root, extract_terms, Codename, CodenameType};
pub use filter::{apply_filters, FilterCriteria, FilterPreset};
pub use grouping::{group_by_root, sort_records, RootGroup, RootGroups, SortDirection, SortKey};
pub use search::{highlight, search, SearchHistory, SearchOptions, SearchState};
pub use service::CodenameService;
pub use snippets::{extract_context, Snippet, SnippetLibrary};
