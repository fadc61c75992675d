// SPDX-License-Identifier: MIT OR Apache-2.0

//! Root group view and expansion toggles

use anyhow::Result;
use colored::Colorize;

use cnref::errors::UnknownRootError;

use super::{render_line, Context};
use crate::cli::{OutputFormat, SortArgs};

/// Run the groups command
pub fn run(ctx: &mut Context, all: bool, sort_args: SortArgs) -> Result<()> {
    let sort = ctx.resolve_sort(&sort_args);
    let mut groups = ctx.service.by_root();
    groups.sort_within(sort.criteria, sort.direction);

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&groups)?,
        OutputFormat::Text => {
            let palette = ctx.palette();
            for group in groups.sorted() {
                let marker = if group.expanded { "▾" } else { "▸" };
                println!(
                    "{} {} ({})",
                    marker,
                    group.root.color(palette.root).bold(),
                    group.records.len()
                );
                if group.expanded || all {
                    for cn in &group.records {
                        println!("    {}", render_line(cn, palette, None));
                    }
                }
            }
            println!(
                "\n{} {} root groups",
                "✓".green(),
                groups.len().to_string().cyan()
            );
        }
    }

    Ok(())
}

/// Run the expand/collapse commands
pub fn set_expanded(ctx: &mut Context, root: &str, expanded: bool) -> Result<()> {
    let groups = ctx.service.by_root();
    if !groups.contains(root) {
        return Err(UnknownRootError {
            root: root.to_string(),
            known: groups.sorted_roots().into_iter().map(str::to_string).collect(),
        }
        .into());
    }

    ctx.service.set_root_expanded(root, expanded);

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&serde_json::json!({
            "root": root,
            "expanded": expanded,
        }))?,
        OutputFormat::Text => {
            let verb = if expanded { "Expanded" } else { "Collapsed" };
            println!("{} {} {}", "✓".green(), verb, root.yellow());
        }
    }

    Ok(())
}
