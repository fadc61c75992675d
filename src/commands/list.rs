// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filtered codename listing

use anyhow::Result;
use colored::Colorize;

use cnref::{CodenameType, FilterCriteria};

use super::{render_line, Context};
use crate::cli::{OutputFormat, SortArgs};

/// Flags of the `list` command
#[derive(Debug, Default)]
pub struct ListOptions {
    pub types: Vec<CodenameType>,
    pub roots: Vec<String>,
    pub exclude_roots: Vec<String>,
    pub query: Option<String>,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub saved: bool,
    pub save: bool,
}

/// Turn the flags into criteria, starting from defaults or the stored state.
fn build_criteria(ctx: &mut Context, opts: &ListOptions) -> FilterCriteria {
    let mut criteria = if opts.saved {
        ctx.service
            .prefs()
            .load_filter_state(FilterCriteria::default())
    } else {
        FilterCriteria::default()
    };

    // Explicit `false` entries so a saved state survives the merge over defaults.
    if !opts.types.is_empty() {
        for kind in CodenameType::ALL {
            criteria
                .type_filters
                .insert(kind, opts.types.contains(&kind));
        }
    }

    if !opts.roots.is_empty() {
        let groups = ctx.service.by_root();
        for root in groups.sorted_roots() {
            criteria.set_root(root, opts.roots.iter().any(|r| r == root));
        }
    }
    for root in &opts.exclude_roots {
        criteria.set_root(root, false);
    }

    if let Some(query) = &opts.query {
        criteria.search_text = query.trim().to_string();
    }
    criteria.case_sensitive |= opts.case_sensitive;
    criteria.whole_word |= opts.whole_word;
    criteria
}

/// Run the list command
pub fn run(ctx: &mut Context, opts: ListOptions, sort_args: SortArgs) -> Result<()> {
    let criteria = build_criteria(ctx, &opts);
    let sort = ctx.resolve_sort(&sort_args);

    let total = ctx.service.all().len();
    let filtered = ctx.service.filter(&criteria);
    let results = ctx.service.sort(&filtered, sort.criteria, sort.direction);

    if opts.save {
        let prefs = ctx.service.prefs_mut();
        prefs.save_filter_state(&criteria);
        prefs.save_sort(sort);
    }

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&results)?,
        OutputFormat::Text => {
            let palette = ctx.palette();
            let highlight = (!criteria.search_text.is_empty()).then_some(criteria.search_text.as_str());
            for cn in &results {
                println!("  {}", render_line(cn, palette, highlight));
            }
            println!(
                "\n{} {} of {} codenames (sorted by {})",
                "✓".green(),
                results.len().to_string().cyan(),
                total,
                sort.criteria
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnref::prefs::Preferences;
    use cnref::CodenameService;

    fn context() -> Context {
        let mut service = CodenameService::new(Preferences::in_memory());
        service.initialize(None);
        Context {
            service,
            format: OutputFormat::Json,
            compact: true,
            page_size: 10,
        }
    }

    #[test]
    fn only_roots_disables_every_other_root() {
        let mut ctx = context();
        let opts = ListOptions {
            roots: vec!["event".to_string()],
            ..ListOptions::default()
        };
        let criteria = build_criteria(&mut ctx, &opts);
        assert_eq!(criteria.root_filters.get("event"), Some(&true));
        assert_eq!(criteria.root_filters.get("data"), Some(&false));
        let results = ctx.service.filter(&criteria);
        assert!(results.iter().all(|cn| cn.root() == "event"));
        assert!(!results.is_empty());
    }

    #[test]
    fn type_flags_replace_default_types() {
        let mut ctx = context();
        let opts = ListOptions {
            types: vec![CodenameType::File],
            ..ListOptions::default()
        };
        let criteria = build_criteria(&mut ctx, &opts);
        let results = ctx.service.filter(&criteria);
        assert_eq!(results.len(), 10);
        assert!(results.iter().all(|cn| cn.kind() == CodenameType::File));
    }

    #[test]
    fn saved_state_is_the_starting_point() {
        let mut ctx = context();
        let mut stored = FilterCriteria::default();
        stored.set_root("data", false);
        ctx.service.prefs_mut().save_filter_state(&stored);

        let opts = ListOptions {
            saved: true,
            exclude_roots: vec!["element".to_string()],
            ..ListOptions::default()
        };
        let criteria = build_criteria(&mut ctx, &opts);
        assert_eq!(criteria.root_filters.get("data"), Some(&false));
        assert_eq!(criteria.root_filters.get("element"), Some(&false));
    }
}
