// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types with helpful suggestions
//!
//! Library boundaries use `thiserror` enums; the CLI-facing errors carry
//! user-friendly messages with actionable suggestions.

use std::fmt;
use thiserror::Error;

/// Errors raised while building codename records
#[derive(Debug, Error)]
pub enum CodenameError {
    #[error("unknown codename type '{0}' (expected one of: function, variable, class, parameter, constant, event, property, file)")]
    UnknownType(String),

    #[error("codename name must not be empty")]
    EmptyName,

    #[error("failed to parse codename data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by a preference store backend
#[derive(Debug, Error)]
pub enum PrefError {
    #[error("preference store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("preference store is unavailable")]
    Unavailable,
}

/// Error indicating no codenames matched a query
#[derive(Debug)]
pub struct NoResultsError {
    pub query: String,
}

impl fmt::Display for NoResultsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No codenames found for query: '{}'\n\n\
             Suggestions:\n\
             - Try a shorter query or a single term\n\
             - Drop --whole-word to allow substring matches\n\
             - List recent queries: cnref history",
            self.query
        )
    }
}

impl std::error::Error for NoResultsError {}

/// Error indicating a root term does not exist in the working set
#[derive(Debug)]
pub struct UnknownRootError {
    pub root: String,
    pub known: Vec<String>,
}

impl fmt::Display for UnknownRootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown root term: '{}'\n\n\
             Known roots: {}\n\n\
             Example: cnref expand element",
            self.root,
            self.known.join(", ")
        )
    }
}

impl std::error::Error for UnknownRootError {}

/// Error indicating a filter preset id was not found
#[derive(Debug)]
pub struct PresetNotFoundError {
    pub id: u64,
}

impl fmt::Display for PresetNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Filter preset {} not found\n\n\
             Suggestion: list saved presets with 'cnref preset list'",
            self.id
        )
    }
}

impl std::error::Error for PresetNotFoundError {}
