// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search, suggestion and history commands

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use cnref::errors::NoResultsError;
use cnref::search::{highlight, SearchOptions, SearchState};
use cnref::Codename;

use super::{emphasize_match, render_line, Context};
use crate::cli::OutputFormat;

/// Search hit for JSON output
#[derive(Debug, Serialize)]
struct SearchHit<'a> {
    #[serde(flatten)]
    codename: &'a Codename,
    highlighted_name: String,
    highlighted_description: String,
}

/// One page of results for JSON output
#[derive(Debug, Serialize)]
struct SearchPage<'a> {
    query: &'a str,
    page: usize,
    page_size: usize,
    total_pages: usize,
    total: usize,
    results: Vec<SearchHit<'a>>,
}

/// Run the search command
pub fn run(
    ctx: &mut Context,
    query: &str,
    options: SearchOptions,
    page: usize,
    page_size: usize,
) -> Result<()> {
    let results = ctx.service.search(query, options);

    let mut state = SearchState::new(ctx.service.prefs().load_history(), page_size);
    state.accept(query, options, results);
    state.go_to(page);
    ctx.service.prefs_mut().save_history(&state.history);

    match ctx.format {
        OutputFormat::Json => {
            let hits = state
                .page_items()
                .iter()
                .map(|cn| SearchHit {
                    codename: cn,
                    highlighted_name: highlight(cn.name(), query),
                    highlighted_description: highlight(cn.description(), query),
                })
                .collect();
            let page = SearchPage {
                query,
                page: state.page(),
                page_size: state.page_size(),
                total_pages: state.total_pages(),
                total: state.results.len(),
                results: hits,
            };
            ctx.print_json(&page)?;
        }
        OutputFormat::Text => {
            if state.results.is_empty() {
                eprintln!(
                    "{} {}",
                    "✗".red(),
                    NoResultsError {
                        query: query.to_string()
                    }
                );
                return Ok(());
            }

            println!("\n{} Searching for: {}\n", "🔍".cyan(), query.yellow());
            let palette = ctx.palette();
            for cn in state.page_items() {
                println!("  {}", render_line(cn, palette, Some(query)));
            }
            println!(
                "\n{} Found {} codenames (page {}/{})",
                "✓".green(),
                state.results.len().to_string().cyan(),
                state.page(),
                state.total_pages()
            );
        }
    }

    Ok(())
}

/// Run the suggest command
pub fn suggest(ctx: &Context, prefix: &str) -> Result<()> {
    let suggestions = ctx.service.prefs().load_history().get_suggestions(prefix);

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&suggestions)?,
        OutputFormat::Text => {
            for suggestion in &suggestions {
                let line = emphasize_match(suggestion, prefix).unwrap_or_else(|| suggestion.clone());
                println!("  {line}");
            }
        }
    }

    Ok(())
}

/// Run the history command
pub fn history(ctx: &mut Context, clear: bool) -> Result<()> {
    let mut history = ctx.service.prefs().load_history();
    if clear {
        history.clear();
        ctx.service.prefs_mut().save_history(&history);
    }

    let entries: Vec<&str> = history.entries().collect();
    match ctx.format {
        OutputFormat::Json => ctx.print_json(&entries)?,
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("{} No recent queries", "✗".red());
            }
            for (i, entry) in entries.iter().enumerate() {
                println!("  {:>2}. {}", i + 1, entry);
            }
        }
    }

    Ok(())
}
