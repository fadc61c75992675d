// SPDX-License-Identifier: MIT OR Apache-2.0

//! Term analytics over a codename collection

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::codename::Codename;

/// A term that co-occurs with a looked-up term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedTerm {
    pub term: String,
    pub frequency: usize,
}

/// Similarity between two term lists
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermComparison {
    pub match_count: usize,
    pub match_ratio: f64,
    pub same_root: bool,
}

/// Count how often each term appears across all codenames.
pub fn term_frequency(records: &[Codename]) -> BTreeMap<String, usize> {
    let mut frequency = BTreeMap::new();
    for term in records.iter().flat_map(|cn| cn.terms()) {
        *frequency.entry(term.clone()).or_insert(0) += 1;
    }
    frequency
}

/// Terms appearing alongside `term`, most frequent first.
pub fn related_terms(records: &[Codename], term: &str) -> Vec<RelatedTerm> {
    if term.is_empty() {
        return Vec::new();
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for cn in records.iter().filter(|cn| cn.terms().iter().any(|t| t == term)) {
        for other in cn.terms().iter().filter(|t| *t != term) {
            *counts.entry(other.as_str()).or_insert(0) += 1;
        }
    }

    let mut related: Vec<RelatedTerm> = counts
        .into_iter()
        .map(|(term, frequency)| RelatedTerm {
            term: term.to_string(),
            frequency,
        })
        .collect();
    // BTreeMap order gives the alphabetical tiebreak; the sort is stable.
    related.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    related
}

/// Compare two term lists.
///
/// `match_ratio` divides the matches by the number of distinct terms in
/// both lists together.
pub fn compare_terms(a: &[String], b: &[String]) -> TermComparison {
    let match_count = a.iter().filter(|t| b.contains(*t)).count();
    let total: HashSet<&String> = a.iter().chain(b.iter()).collect();
    let match_ratio = if total.is_empty() {
        0.0
    } else {
        match_count as f64 / total.len() as f64
    };
    let same_root = match (a.first(), b.first()) {
        (Some(x), Some(y)) => x == y,
        (None, None) => true,
        _ => false,
    };

    TermComparison {
        match_count,
        match_ratio,
        same_root,
    }
}
