// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stored filter state: show, toggle and reset

use anyhow::{bail, Result};
use colored::Colorize;
use serde::Serialize;

use cnref::errors::UnknownRootError;
use cnref::{CodenameType, FilterCriteria};

use super::Context;
use crate::cli::OutputFormat;

#[derive(Debug, Serialize)]
struct FilterReport<'a> {
    #[serde(flatten)]
    criteria: &'a FilterCriteria,
    matched: usize,
    total: usize,
}

/// Stored criteria with every known root registered.
fn stored_state(ctx: &mut Context) -> FilterCriteria {
    let mut criteria = ctx
        .service
        .prefs()
        .load_filter_state(FilterCriteria::default());
    let groups = ctx.service.by_root();
    criteria.ensure_roots(groups.sorted_roots());
    criteria
}

fn store(ctx: &mut Context, criteria: &FilterCriteria) -> Result<()> {
    if !ctx.service.prefs_mut().save_filter_state(criteria) {
        bail!("Failed to save filter state; the preference store may be unavailable");
    }
    Ok(())
}

fn report(ctx: &mut Context, criteria: &FilterCriteria) -> Result<()> {
    let total = ctx.service.all().len();
    let matched = ctx.service.filter(criteria).len();

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&FilterReport {
            criteria,
            matched,
            total,
        })?,
        OutputFormat::Text => {
            let types: Vec<String> = CodenameType::ALL
                .iter()
                .map(|kind| {
                    let on = criteria.type_filters.get(kind).copied().unwrap_or(false);
                    if on {
                        kind.as_str().green().to_string()
                    } else {
                        kind.as_str().dimmed().strikethrough().to_string()
                    }
                })
                .collect();
            println!("types: {}", types.join(" "));

            let hidden: Vec<&str> = criteria
                .root_filters
                .iter()
                .filter(|(_, enabled)| !**enabled)
                .map(|(root, _)| root.as_str())
                .collect();
            if hidden.is_empty() {
                println!("hidden roots: none");
            } else {
                println!("hidden roots: {}", hidden.join(", ").yellow());
            }

            if !criteria.search_text.is_empty() {
                println!(
                    "text: {:?}{}{}",
                    criteria.search_text,
                    if criteria.case_sensitive { " (case-sensitive)" } else { "" },
                    if criteria.whole_word { " (whole word)" } else { "" }
                );
            }
            println!(
                "\n{} {} of {} codenames pass",
                "✓".green(),
                matched.to_string().cyan(),
                total
            );
        }
    }
    Ok(())
}

/// Run the filter show command
pub fn show(ctx: &mut Context) -> Result<()> {
    let criteria = stored_state(ctx);
    report(ctx, &criteria)
}

/// Flip one type in the stored state.
pub fn toggle_type(ctx: &mut Context, kind: CodenameType) -> Result<()> {
    let mut criteria = stored_state(ctx);
    criteria.toggle_type(kind);
    criteria.active_preset = None;
    store(ctx, &criteria)?;
    report(ctx, &criteria)
}

/// Flip one root in the stored state.
pub fn toggle_root(ctx: &mut Context, root: &str) -> Result<()> {
    let groups = ctx.service.by_root();
    if !groups.contains(root) {
        return Err(UnknownRootError {
            root: root.to_string(),
            known: groups.sorted_roots().into_iter().map(str::to_string).collect(),
        }
        .into());
    }

    let mut criteria = stored_state(ctx);
    criteria.toggle_root(root);
    criteria.active_preset = None;
    store(ctx, &criteria)?;
    report(ctx, &criteria)
}

/// Re-enable everything in the stored state.
pub fn reset(ctx: &mut Context) -> Result<()> {
    let mut criteria = stored_state(ctx);
    criteria.reset();
    store(ctx, &criteria)?;
    report(ctx, &criteria)
}
