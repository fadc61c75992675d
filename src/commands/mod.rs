// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command runners - one module per subcommand family

pub mod filter;
pub mod groups;
pub mod import;
pub mod list;
pub mod preset;
pub mod search;
pub mod snippet;
pub mod terms;
pub mod theme;

use anyhow::Result;
use colored::{Color, Colorize};
use serde::Serialize;

use cnref::grouping::SortKey;
use cnref::prefs::{SortPreference, Theme};
use cnref::search::match_range;
use cnref::{Codename, CodenameService};

use crate::cli::{OutputFormat, SortArgs};

/// Everything a command needs, built once in `main`
pub struct Context {
    pub service: CodenameService,
    pub format: OutputFormat,
    pub compact: bool,
    pub page_size: usize,
}

impl Context {
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let rendered = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        println!("{rendered}");
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.service.prefs().load_theme())
    }

    /// Sort order from the flags, falling back to the stored preference.
    pub fn resolve_sort(&self, args: &SortArgs) -> SortPreference {
        let stored = self.service.prefs().load_sort();
        SortPreference {
            criteria: args.sort.map(SortKey::from).unwrap_or(stored.criteria),
            direction: args.direction().unwrap_or(stored.direction),
        }
    }
}

/// Text colors for the active theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub root: Color,
    pub kind: Color,
    pub accent: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                root: Color::Blue,
                kind: Color::Magenta,
                accent: Color::Green,
            },
            Theme::Dark => Self {
                root: Color::BrightCyan,
                kind: Color::BrightMagenta,
                accent: Color::BrightGreen,
            },
        }
    }
}

/// `text` with the first match of `query` in bold yellow, if it matches.
pub fn emphasize_match(text: &str, query: &str) -> Option<String> {
    let (start, end) = match_range(text, query)?;
    Some(format!(
        "{}{}{}",
        &text[..start],
        text[start..end].yellow().bold(),
        &text[end..]
    ))
}

/// Name with its root term emphasized, or with the first `query` match highlighted.
pub fn render_name(cn: &Codename, palette: Palette, query: Option<&str>) -> String {
    let name = cn.name();
    if let Some(marked) = query.and_then(|q| emphasize_match(name, q)) {
        return marked;
    }
    let root_len = cn.root().len();
    format!(
        "{}{}",
        name[..root_len].color(palette.root).bold(),
        &name[root_len..]
    )
}

/// One codename as a text line: `[type] name  description`
pub fn render_line(cn: &Codename, palette: Palette, query: Option<&str>) -> String {
    let kind = format!("[{}]", cn.kind());
    let mut line = format!("{} {}", kind.color(palette.kind), render_name(cn, palette, query));
    if !cn.description().is_empty() {
        line.push_str("  ");
        line.push_str(&cn.description().dimmed().to_string());
    }
    line
}
