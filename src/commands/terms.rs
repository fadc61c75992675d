// SPDX-License-Identifier: MIT OR Apache-2.0

//! Term frequency, related terms and term comparison

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use cnref::extract_terms;
use cnref::terms::{compare_terms, RelatedTerm};

use super::Context;
use crate::cli::OutputFormat;

/// Run the terms command
pub fn frequency(ctx: &mut Context, limit: Option<usize>) -> Result<()> {
    let mut counts: Vec<RelatedTerm> = ctx
        .service
        .term_frequency()
        .into_iter()
        .map(|(term, frequency)| RelatedTerm { term, frequency })
        .collect();
    counts.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    if let Some(limit) = limit {
        counts.truncate(limit);
    }

    print_terms(ctx, &counts)
}

/// Run the related command
pub fn related(ctx: &mut Context, term: &str) -> Result<()> {
    let related = ctx.service.related_terms(term);
    if related.is_empty() && ctx.format == OutputFormat::Text {
        println!("{} No terms co-occur with {}", "✗".red(), term.yellow());
        return Ok(());
    }
    print_terms(ctx, &related)
}

fn print_terms(ctx: &Context, terms: &[RelatedTerm]) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => ctx.print_json(terms)?,
        OutputFormat::Text => {
            let palette = ctx.palette();
            for entry in terms {
                println!(
                    "  {:>4}  {}",
                    entry.frequency.to_string().cyan(),
                    entry.term.color(palette.root)
                );
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ComparisonReport<'a> {
    a: &'a str,
    b: &'a str,
    match_count: usize,
    match_ratio: f64,
    same_root: bool,
}

/// Run the compare command
pub fn compare(ctx: &Context, a: &str, b: &str) -> Result<()> {
    let comparison = compare_terms(&extract_terms(a), &extract_terms(b));
    let report = ComparisonReport {
        a,
        b,
        match_count: comparison.match_count,
        match_ratio: comparison.match_ratio,
        same_root: comparison.same_root,
    };

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&report)?,
        OutputFormat::Text => {
            println!("{} vs {}", a.yellow(), b.yellow());
            println!("  shared terms: {}", report.match_count.to_string().cyan());
            println!("  match ratio:  {:.2}", report.match_ratio);
            println!(
                "  same root:    {}",
                if report.same_root { "yes".green() } else { "no".red() }
            );
        }
    }
    Ok(())
}
