// SPDX-License-Identifier: MIT OR Apache-2.0

//! Codename record model and term decomposition
//!
//! A codename is a `_`-joined identifier such as `element_create`. Its terms
//! and root are always derived from the name, never trusted from input.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between terms of a codename
pub const TERM_SEPARATOR: char = '_';

/// Kind of identifier a codename names
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodenameType {
    Function,
    Variable,
    Class,
    Parameter,
    Constant,
    Event,
    Property,
    File,
}

impl CodenameType {
    pub const ALL: [CodenameType; 8] = [
        CodenameType::Function,
        CodenameType::Variable,
        CodenameType::Class,
        CodenameType::Parameter,
        CodenameType::Constant,
        CodenameType::Event,
        CodenameType::Property,
        CodenameType::File,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CodenameType::Function => "function",
            CodenameType::Variable => "variable",
            CodenameType::Class => "class",
            CodenameType::Parameter => "parameter",
            CodenameType::Constant => "constant",
            CodenameType::Event => "event",
            CodenameType::Property => "property",
            CodenameType::File => "file",
        }
    }
}

impl fmt::Display for CodenameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodenameType {
    type Err = crate::errors::CodenameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        CodenameType::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| crate::errors::CodenameError::UnknownType(s.to_string()))
    }
}

/// One naming entry of the taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Codename {
    name: String,
    #[serde(rename = "type")]
    kind: CodenameType,
    description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    examples: Vec<String>,
    terms: Vec<String>,
    root: String,
}

impl Codename {
    pub fn new(name: impl Into<String>, kind: CodenameType, description: impl Into<String>) -> Self {
        let name = name.into();
        let terms = extract_terms(&name);
        let root = extract_root(&name);
        Self {
            name,
            kind,
            description: description.into(),
            examples: Vec::new(),
            terms,
            root,
        }
    }

    /// Attach usage examples, producing a new record
    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.examples = examples;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CodenameType {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn root(&self) -> &str {
        &self.root
    }
}

/// Wire shape accepted on input. Derived fields (`terms`, `root`) are ignored.
#[derive(Deserialize)]
struct RawCodename {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "example")]
    examples: Vec<String>,
}

impl<'de> Deserialize<'de> for Codename {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawCodename::deserialize(deserializer)?;
        let kind: CodenameType = raw
            .kind
            .parse()
            .map_err(<D::Error as serde::de::Error>::custom)?;
        Ok(Codename::new(raw.name, kind, raw.description.unwrap_or_default())
            .with_examples(raw.examples))
    }
}

/// Split a codename into its ordered terms.
///
/// Empty input yields no terms. Empty tokens are kept, so `"foo_"`
/// decomposes to `["foo", ""]`.
pub fn extract_terms(name: &str) -> Vec<String> {
    if name.is_empty() {
        return Vec::new();
    }
    name.split(TERM_SEPARATOR).map(str::to_string).collect()
}

/// Root term of a codename: everything before the first separator.
pub fn extract_root(name: &str) -> String {
    match name.find(TERM_SEPARATOR) {
        Some(idx) => name[..idx].to_string(),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_round_trip_through_separator() {
        for name in ["element_create", "log_level_debug", "a_b_c_d", "foo_", "_bar"] {
            let terms = extract_terms(name);
            assert_eq!(terms.join("_"), name);
        }
    }

    #[test]
    fn root_matches_first_term() {
        for name in ["element_create", "single", "foo_", "_bar", "x_y"] {
            assert_eq!(extract_root(name), extract_terms(name)[0]);
        }
        assert_eq!(extract_root(""), "");
        assert!(extract_terms("").is_empty());
    }

    #[test]
    fn trailing_separator_keeps_empty_term() {
        assert_eq!(extract_terms("foo_"), vec!["foo".to_string(), String::new()]);
        assert_eq!(extract_root("foo_"), "foo");
    }

    #[test]
    fn name_without_separator_is_its_own_root() {
        let cn = Codename::new("theme", CodenameType::Variable, "");
        assert_eq!(cn.terms(), &["theme".to_string()]);
        assert_eq!(cn.root(), "theme");
    }

    #[test]
    fn deserialize_rederives_terms_and_root() {
        let json = r#"{"name":"data_fetch","type":"function","root":"bogus","terms":["x"]}"#;
        let cn: Codename = serde_json::from_str(json).expect("parse");
        assert_eq!(cn.root(), "data");
        assert_eq!(cn.terms(), &["data".to_string(), "fetch".to_string()]);
        assert_eq!(cn.description(), "");
    }

    #[test]
    fn deserialize_accepts_any_type_casing() {
        let cn: Codename =
            serde_json::from_str(r#"{"name":"nav_open","type":"Event"}"#).expect("parse");
        assert_eq!(cn.kind(), CodenameType::Event);
    }

    #[test]
    fn deserialize_names_the_unknown_type() {
        let err = serde_json::from_str::<Codename>(r#"{"name":"nav_open","type":"widget"}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown codename type 'widget'"), "{err}");
        assert!(err.contains("expected one of"), "{err}");
    }

    #[test]
    fn type_parses_case_insensitively() {
        assert_eq!("Function".parse::<CodenameType>().unwrap(), CodenameType::Function);
        assert!("widget".parse::<CodenameType>().is_err());
    }
}
