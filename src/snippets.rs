// SPDX-License-Identifier: MIT OR Apache-2.0

//! Code snippets attached to codenames
//!
//! Saved snippets win over the built-in examples; a codename with neither
//! gets a generated placeholder shaped after what its name suggests.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lines shown before and after a focused line by default
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Snippets keyed by codename
pub type SnippetMap = BTreeMap<String, Vec<Snippet>>;

/// One usage example for a codename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub generated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl Snippet {
    pub fn new(
        code: impl Into<String>,
        language: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            description: description.into(),
            generated: false,
            timestamp: None,
        }
    }

    fn matches(&self, query: &str) -> bool {
        self.code.contains(query) || self.description.contains(query)
    }
}

/// Window of a snippet around one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetContext {
    pub code: String,
    /// Index of the focused line inside `code`
    pub highlight_line: usize,
}

static BUILTIN: Lazy<SnippetMap> = Lazy::new(|| {
    let entries: [(&str, Snippet); 6] = [
        (
            "element_create",
            Snippet::new(
                "const button = element_create('button', {\n    class: 'button button_primary',\n    type: 'button',\n    text: 'Click me'\n});\n\ndocument.body.appendChild(button);",
                "javascript",
                "Creating a button element",
            ),
        ),
        (
            "element_create",
            Snippet::new(
                "const container = element_create('div', { class: 'container' }, [\n    element_create('h1', { class: 'title', text: 'Hello World' }),\n    element_create('p', { class: 'content', text: 'Lorem ipsum dolor sit amet' })\n]);",
                "javascript",
                "Creating a container with children",
            ),
        ),
        (
            "data_fetch",
            Snippet::new(
                "const user_data = await data_fetch('https://api.example.com/users/1');\nconsole.log(user_data.name);",
                "javascript",
                "Fetching user data from an API",
            ),
        ),
        (
            "app_container",
            Snippet::new(
                "const app_container = document.getElementById('app');\n\napp_container.innerHTML = '<h1>Welcome to the application</h1>';",
                "javascript",
                "Accessing the main application container",
            ),
        ),
        (
            "theme_current",
            Snippet::new(
                "// Check the current theme\nif (theme_current === 'dark') {\n    document.body.classList.add('theme_dark');\n} else {\n    document.body.classList.remove('theme_dark');\n}",
                "javascript",
                "Using the current theme variable",
            ),
        ),
        (
            "header_container",
            Snippet::new(
                "<header class=\"header_container\">\n    <h1 class=\"header_title\">Application Title</h1>\n    <nav class=\"header_nav\">\n        <ul class=\"nav_list\">\n            <li class=\"nav_item\"><a href=\"#\" class=\"nav_link\">Home</a></li>\n            <li class=\"nav_item\"><a href=\"#\" class=\"nav_link\">About</a></li>\n        </ul>\n    </nav>\n</header>",
                "html",
                "HTML structure using header classes",
            ),
        ),
    ];

    let mut map = SnippetMap::new();
    for (codename, snippet) in entries {
        map.entry(codename.to_string()).or_default().push(snippet);
    }
    map
});

/// Built-in examples shipped with the catalog.
pub fn builtin_snippets() -> &'static SnippetMap {
    &BUILTIN
}

/// Saved snippets layered over the built-in examples
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetLibrary {
    saved: SnippetMap,
}

impl SnippetLibrary {
    pub fn new(saved: SnippetMap) -> Self {
        Self { saved }
    }

    pub fn saved(&self) -> &SnippetMap {
        &self.saved
    }

    /// Saved snippets for `codename`, else the built-in ones, else a placeholder.
    pub fn lookup(&self, codename: &str) -> Vec<Snippet> {
        if codename.is_empty() {
            return Vec::new();
        }
        if let Some(saved) = self.saved.get(codename).filter(|s| !s.is_empty()) {
            return saved.clone();
        }
        if let Some(builtin) = builtin_snippets().get(codename) {
            return builtin.clone();
        }
        vec![placeholder(codename)]
    }

    /// Append a snippet stamped with `timestamp`. Rejects an empty codename or code.
    pub fn add(&mut self, codename: &str, mut snippet: Snippet, timestamp: u64) -> bool {
        if codename.is_empty() || snippet.code.is_empty() {
            return false;
        }
        snippet.generated = false;
        snippet.timestamp = Some(timestamp);
        self.saved.entry(codename.to_string()).or_default().push(snippet);
        true
    }

    /// Snippets whose code or description contains `query` (case-sensitive).
    ///
    /// Saved matches shadow the built-in snippets of the same codename.
    pub fn search(&self, query: &str) -> SnippetMap {
        let mut results = SnippetMap::new();
        if query.is_empty() {
            return results;
        }
        collect_matches(&self.saved, query, &mut results);
        collect_matches(builtin_snippets(), query, &mut results);
        results
    }

    pub fn clear(&mut self) {
        self.saved.clear();
    }
}

fn collect_matches(source: &SnippetMap, query: &str, results: &mut SnippetMap) {
    for (codename, snippets) in source {
        if results.contains_key(codename) {
            continue;
        }
        let matching: Vec<Snippet> = snippets.iter().filter(|s| s.matches(query)).cloned().collect();
        if !matching.is_empty() {
            results.insert(codename.clone(), matching);
        }
    }
}

/// Generated example for a codename with no saved or built-in snippet.
pub fn placeholder(codename: &str) -> Snippet {
    let looks_like = |suffixes: &[&str]| suffixes.iter().any(|s| codename.contains(s));

    let (code, language) = if looks_like(&["_create", "_update", "_delete", "_fetch"]) {
        (
            format!(
                "// Example function usage\nconst result = {codename}('example', {{\n    option1: true,\n    option2: 'value'\n}});\n\nconsole.log(result);"
            ),
            "javascript",
        )
    } else if looks_like(&["_container", "_list", "_item"]) {
        (
            format!(
                "<!-- Example HTML with class -->\n<div class=\"{codename}\">\n    <h2>Content Title</h2>\n    <p>Content text goes here</p>\n</div>\n\n/* Example CSS */\n.{codename} {{\n    display: block;\n    padding: 1rem;\n    margin-bottom: 1rem;\n    border-radius: 4px;\n    background-color: #f5f5f5;\n}}"
            ),
            "html",
        )
    } else {
        (
            format!(
                "// Example variable usage\nconst {codename} = {{\n    id: 1,\n    name: 'Example',\n    active_is: true\n}};\n\nconsole.log({codename}.name);"
            ),
            "javascript",
        )
    };

    Snippet {
        generated: true,
        ..Snippet::new(code, language, format!("Example usage of {codename}"))
    }
}

/// Lines of `code` within `context_lines` of the 0-based `line`.
///
/// An out-of-range line returns the whole snippet focused on its first line.
pub fn extract_context(code: &str, line: usize, context_lines: usize) -> SnippetContext {
    if code.is_empty() {
        return SnippetContext {
            code: String::new(),
            highlight_line: 0,
        };
    }

    let lines: Vec<&str> = code.split('\n').collect();
    if line >= lines.len() {
        return SnippetContext {
            code: code.to_string(),
            highlight_line: 0,
        };
    }

    let start = line.saturating_sub(context_lines);
    let end = (line + context_lines).min(lines.len() - 1);
    SnippetContext {
        code: lines[start..=end].join("\n"),
        highlight_line: line - start,
    }
}
