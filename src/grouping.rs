// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grouping of codenames by root term and the record sort contract

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::codename::Codename;

/// Root-locale collator: punctuation before digits before letters, accents
/// and then case as tiebreaks, lowercase first.
static COLLATOR: Lazy<Option<CollatorBorrowed<'static>>> = Lazy::new(|| {
    match Collator::try_new(Default::default(), CollatorOptions::default()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!(error = %e, "collation data unavailable, falling back to case-folded ordering");
            None
        }
    }
});

/// Field to sort records by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Type,
    Root,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Name => "name",
            SortKey::Type => "type",
            SortKey::Root => "root",
        })
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "type" => Ok(SortKey::Type),
            "root" => Ok(SortKey::Root),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

/// Codenames sharing one root term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootGroup {
    pub root: String,
    pub records: Vec<Codename>,
    pub expanded: bool,
}

/// All root groups of a working set, in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootGroups {
    groups: Vec<RootGroup>,
    index: HashMap<String, usize>,
}

impl RootGroups {
    pub fn get(&self, root: &str) -> Option<&RootGroup> {
        self.index.get(root).map(|&i| &self.groups[i])
    }

    pub fn contains(&self, root: &str) -> bool {
        self.index.contains_key(root)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &RootGroup> {
        self.groups.iter()
    }

    /// Root keys ascending, the order groups are rendered in.
    pub fn sorted_roots(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = self.groups.iter().map(|g| g.root.as_str()).collect();
        roots.sort_unstable();
        roots
    }

    /// Groups ordered by root key.
    pub fn sorted(&self) -> Vec<&RootGroup> {
        self.sorted_roots()
            .into_iter()
            .filter_map(|root| self.get(root))
            .collect()
    }

    /// Copy persisted expansion flags onto matching groups; unknown roots are ignored.
    pub fn apply_expansion(&mut self, state: &BTreeMap<String, bool>) {
        for (root, expanded) in state {
            if let Some(&i) = self.index.get(root) {
                self.groups[i].expanded = *expanded;
            }
        }
    }

    pub fn set_expanded(&mut self, root: &str, expanded: bool) -> bool {
        match self.index.get(root) {
            Some(&i) => {
                self.groups[i].expanded = expanded;
                true
            }
            None => false,
        }
    }

    /// Sort the records inside every group.
    pub fn sort_within(&mut self, key: SortKey, direction: SortDirection) {
        for group in &mut self.groups {
            sort_in_place(&mut group.records, key, direction);
        }
    }
}

impl Serialize for RootGroups {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.sorted())
    }
}

/// Partition records by root term. Groups start collapsed.
pub fn group_by_root(records: &[Codename]) -> RootGroups {
    let mut groups = RootGroups::default();
    for cn in records {
        match groups.index.get(cn.root()).copied() {
            Some(i) => groups.groups[i].records.push(cn.clone()),
            None => {
                groups.index.insert(cn.root().to_string(), groups.groups.len());
                groups.groups.push(RootGroup {
                    root: cn.root().to_string(),
                    records: vec![cn.clone()],
                    expanded: false,
                });
            }
        }
    }
    groups
}

/// Return a sorted copy of `records`.
pub fn sort_records(records: &[Codename], key: SortKey, direction: SortDirection) -> Vec<Codename> {
    let mut sorted = records.to_vec();
    sort_in_place(&mut sorted, key, direction);
    sorted
}

fn sort_in_place(records: &mut [Codename], key: SortKey, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => locale_compare(a.name(), b.name()),
            SortKey::Type => locale_compare(a.kind().as_str(), b.kind().as_str())
                .then_with(|| locale_compare(a.name(), b.name())),
            SortKey::Root => locale_compare(a.root(), b.root())
                .then_with(|| locale_compare(a.name(), b.name())),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Locale-aware ordering of two names.
///
/// Strings the collator considers equal fall back to code point order so
/// sorting stays deterministic.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let ordering = match COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase))
            .then_with(|| b.cmp(a)),
    };
    ordering.then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codename::CodenameType;

    fn sample() -> Vec<Codename> {
        vec![
            Codename::new("element_remove", CodenameType::Function, ""),
            Codename::new("data_load", CodenameType::Function, ""),
            Codename::new("element_tag", CodenameType::Parameter, ""),
            Codename::new("element_create", CodenameType::Function, ""),
            Codename::new("data_loaded_is", CodenameType::Variable, ""),
        ]
    }

    #[test]
    fn groups_cover_every_record_once() {
        let records = sample();
        let groups = group_by_root(&records);
        let mut names: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.records.iter().map(Codename::name))
            .collect();
        let mut expected: Vec<&str> = records.iter().map(Codename::name).collect();
        names.sort();
        expected.sort();
        assert_eq!(names, expected);
        assert!(groups.iter().all(|g| !g.records.is_empty()));
    }

    #[test]
    fn first_occurrence_order_and_sorted_keys() {
        let groups = group_by_root(&sample());
        let order: Vec<&str> = groups.iter().map(|g| g.root.as_str()).collect();
        assert_eq!(order, vec!["element", "data"]);
        assert_eq!(groups.sorted_roots(), vec!["data", "element"]);
        let element = groups.get("element").expect("element group");
        assert_eq!(element.records[0].name(), "element_remove");
    }

    #[test]
    fn regrouping_is_idempotent() {
        let records = sample();
        assert_eq!(group_by_root(&records), group_by_root(&records));
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_by_root(&[]).is_empty());
    }

    #[test]
    fn sort_by_type_breaks_ties_on_name() {
        let sorted = sort_records(&sample(), SortKey::Type, SortDirection::Asc);
        let names: Vec<&str> = sorted.iter().map(Codename::name).collect();
        assert_eq!(
            names,
            vec!["data_load", "element_create", "element_remove", "element_tag", "data_loaded_is"]
        );
    }

    #[test]
    fn descending_reverses_name_order() {
        let sorted = sort_records(&sample(), SortKey::Name, SortDirection::Desc);
        assert_eq!(sorted.first().map(Codename::name), Some("element_tag"));
        assert_eq!(sorted.last().map(Codename::name), Some("data_load"));
    }

    #[test]
    fn expansion_state_applies_to_known_roots_only() {
        let mut groups = group_by_root(&sample());
        let mut state = BTreeMap::new();
        state.insert("data".to_string(), true);
        state.insert("ghost".to_string(), true);
        groups.apply_expansion(&state);
        assert!(groups.get("data").unwrap().expanded);
        assert!(!groups.get("element").unwrap().expanded);
        assert!(!groups.contains("ghost"));
    }

    #[test]
    fn locale_compare_ignores_case_first() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("data_load", "data_load"), Ordering::Equal);
    }

    #[test]
    fn accented_letters_sort_with_their_base_letter() {
        assert_eq!(locale_compare("éclair", "fetch"), Ordering::Less);
        assert_eq!(locale_compare("eclair", "éclair"), Ordering::Less);
    }

    #[test]
    fn punctuation_sorts_before_digits_before_letters() {
        assert_eq!(locale_compare("log_level", "log2x"), Ordering::Less);
        assert_eq!(locale_compare("utf_decode", "utf8_decode"), Ordering::Less);
        assert_eq!(locale_compare("log2x", "loga"), Ordering::Less);
    }

    #[test]
    fn sort_by_name_uses_collation() {
        let records = vec![
            Codename::new("utf8_decode", CodenameType::Function, ""),
            Codename::new("éclair_bake", CodenameType::Function, ""),
            Codename::new("utf_decode", CodenameType::Function, ""),
            Codename::new("fetch_run", CodenameType::Function, ""),
        ];
        let sorted = sort_records(&records, SortKey::Name, SortDirection::Asc);
        let names: Vec<&str> = sorted.iter().map(Codename::name).collect();
        assert_eq!(names, vec!["éclair_bake", "fetch_run", "utf_decode", "utf8_decode"]);
    }
}
