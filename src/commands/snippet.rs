// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snippet lookup, capture and search

use anyhow::{bail, Context as _, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use cnref::snippets::{extract_context, Snippet, SnippetContext};

use super::{Context, Palette};
use crate::cli::OutputFormat;

/// Snippet with the window around the requested line
#[derive(Debug, Serialize)]
struct FocusedSnippet<'a> {
    #[serde(flatten)]
    snippet: &'a Snippet,
    context: SnippetContext,
}

/// Where the source of a new snippet comes from
#[derive(Debug)]
pub enum SnippetSource {
    Inline(String),
    File(PathBuf),
}

fn print_snippet(snippet: &Snippet, palette: Palette, focus: Option<&SnippetContext>) {
    let label = if snippet.description.is_empty() {
        "(no description)"
    } else {
        snippet.description.as_str()
    };
    let generated = if snippet.generated { " (generated)" } else { "" };
    println!(
        "{} [{}]{}",
        label.color(palette.accent).bold(),
        snippet.language,
        generated.dimmed()
    );

    let (code, highlight) = match focus {
        Some(ctx) => (ctx.code.as_str(), Some(ctx.highlight_line)),
        None => (snippet.code.as_str(), None),
    };
    for (i, line) in code.split('\n').enumerate() {
        if highlight == Some(i) {
            println!("  {} {}", "›".yellow(), line.yellow());
        } else {
            println!("    {line}");
        }
    }
    println!();
}

/// Run the snippet show command. `line` is 1-based.
pub fn show(ctx: &mut Context, codename: &str, line: Option<usize>, context: usize) -> Result<()> {
    let snippets = ctx.service.snippets(codename);
    let focus: Vec<Option<SnippetContext>> = snippets
        .iter()
        .map(|s| line.map(|l| extract_context(&s.code, l.saturating_sub(1), context)))
        .collect();

    match ctx.format {
        OutputFormat::Json => match line {
            Some(_) => {
                let focused: Vec<FocusedSnippet> = snippets
                    .iter()
                    .zip(focus)
                    .filter_map(|(snippet, context)| {
                        context.map(|context| FocusedSnippet { snippet, context })
                    })
                    .collect();
                ctx.print_json(&focused)?;
            }
            None => ctx.print_json(&snippets)?,
        },
        OutputFormat::Text => {
            let palette = ctx.palette();
            println!("{} Snippets for {}\n", "📄".cyan(), codename.yellow());
            for (snippet, focus) in snippets.iter().zip(&focus) {
                print_snippet(snippet, palette, focus.as_ref());
            }
        }
    }
    Ok(())
}

/// Run the snippet add command
pub fn add(
    ctx: &mut Context,
    codename: &str,
    source: SnippetSource,
    language: &str,
    description: &str,
) -> Result<()> {
    let code = match source {
        SnippetSource::Inline(code) => code,
        SnippetSource::File(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read snippet from {}", path.display()))?,
    };
    if code.trim().is_empty() {
        bail!("Snippet code must not be empty\n\nExample: cnref snippet add data_load --code \"data_load()\"");
    }

    let snippet = Snippet::new(code, language, description);
    if !ctx.service.save_snippet(codename, snippet) {
        bail!("Failed to save snippet for '{codename}'; the preference store may be unavailable");
    }
    let count = ctx.service.snippets(codename).len();

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&serde_json::json!({
            "codename": codename,
            "snippets": count,
        }))?,
        OutputFormat::Text => println!(
            "{} Saved snippet for {} ({} total)",
            "✓".green(),
            codename.yellow(),
            count
        ),
    }
    Ok(())
}

/// Run the snippet search command
pub fn search(ctx: &mut Context, query: &str) -> Result<()> {
    let results = ctx.service.search_snippets(query);

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&results)?,
        OutputFormat::Text => {
            if results.is_empty() {
                eprintln!("{} No snippets contain {:?}", "✗".red(), query);
                return Ok(());
            }
            let palette = ctx.palette();
            for (codename, snippets) in &results {
                println!("{} {}\n", "▸".cyan(), codename.color(palette.root).bold());
                for snippet in snippets {
                    print_snippet(snippet, palette, None);
                }
            }
        }
    }
    Ok(())
}

/// Run the snippet clear command
pub fn clear(ctx: &mut Context) -> Result<()> {
    if !ctx.service.clear_snippets() {
        bail!("Failed to clear snippets; the preference store may be unavailable");
    }
    match ctx.format {
        OutputFormat::Json => ctx.print_json(&serde_json::json!({ "cleared": true }))?,
        OutputFormat::Text => println!("{} Cleared saved snippets", "✓".green()),
    }
    Ok(())
}
