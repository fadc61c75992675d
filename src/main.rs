// SPDX-License-Identifier: MIT OR Apache-2.0

//! cnref - Codename reference explorer
//!
//! Groups a naming-convention taxonomy by root term and lets it be
//! filtered, searched and browsed from the terminal.

mod cli;
mod commands;

use anyhow::{Context as _, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, FilterCommands, OutputFormat, PresetCommands, SnippetCommands};
use cnref::catalog::parse_records;
use cnref::config::{Config, ConfigOutputFormat};
use cnref::prefs::{FileStore, Preferences};
use cnref::search::SearchOptions;
use cnref::CodenameService;
use commands::list::ListOptions;
use commands::snippet::SnippetSource;
use commands::Context;

fn main() -> Result<()> {
    // RUST_LOG=debug for filter/search timing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load();
    let format = cli.format.unwrap_or(match config.output_format() {
        Some(ConfigOutputFormat::Json) => OutputFormat::Json,
        _ => OutputFormat::Text,
    });

    let prefs = if cli.no_persist {
        Preferences::in_memory()
    } else {
        match config
            .merge_store_path(cli.store.clone())
            .or_else(FileStore::default_path)
        {
            Some(path) => Preferences::new(Box::new(FileStore::open(path))),
            None => Preferences::in_memory(),
        }
    };

    let initial = match cli.data.clone().or_else(|| config.data_path.clone()) {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read codename data from {}", path.display()))?;
            let records = parse_records(&content)
                .with_context(|| format!("Invalid codename data in {}", path.display()))?;
            Some(records)
        }
        None => None,
    };

    let mut service = CodenameService::new(prefs);
    service.initialize(initial);

    let page_size = config.merge_page_size(None);
    let mut ctx = Context {
        service,
        format,
        compact: cli.compact,
        page_size,
    };

    match cli.command {
        Commands::List {
            types,
            roots,
            exclude_roots,
            query,
            case_sensitive,
            whole_word,
            saved,
            save,
            sort,
        } => {
            let opts = ListOptions {
                types: types.into_iter().map(Into::into).collect(),
                roots,
                exclude_roots,
                query,
                case_sensitive,
                whole_word,
                saved,
                save,
            };
            commands::list::run(&mut ctx, opts, sort)?;
        }
        Commands::Groups { all, sort } => {
            commands::groups::run(&mut ctx, all, sort)?;
        }
        Commands::Expand { root } => {
            commands::groups::set_expanded(&mut ctx, &root, true)?;
        }
        Commands::Collapse { root } => {
            commands::groups::set_expanded(&mut ctx, &root, false)?;
        }
        Commands::Search {
            query,
            case_sensitive,
            whole_word,
            page,
            page_size,
        } => {
            let options = SearchOptions {
                case_sensitive,
                whole_word,
            };
            let page_size = page_size.map(|n| n.max(1)).unwrap_or(ctx.page_size);
            commands::search::run(&mut ctx, &query, options, page, page_size)?;
        }
        Commands::Suggest { prefix } => {
            commands::search::suggest(&ctx, &prefix)?;
        }
        Commands::History { clear } => {
            commands::search::history(&mut ctx, clear)?;
        }
        Commands::Terms { limit } => {
            commands::terms::frequency(&mut ctx, limit)?;
        }
        Commands::Related { term } => {
            commands::terms::related(&mut ctx, &term)?;
        }
        Commands::Compare { a, b } => {
            commands::terms::compare(&ctx, &a, &b)?;
        }
        Commands::Filter { command } => match command {
            FilterCommands::Show => commands::filter::show(&mut ctx)?,
            FilterCommands::Type { kind } => commands::filter::toggle_type(&mut ctx, kind.into())?,
            FilterCommands::Root { root } => commands::filter::toggle_root(&mut ctx, &root)?,
            FilterCommands::Reset => commands::filter::reset(&mut ctx)?,
        },
        Commands::Import { path } => {
            commands::import::run(&mut ctx, &path)?;
        }
        Commands::Snippet { command } => match command {
            SnippetCommands::Show {
                codename,
                line,
                context,
            } => commands::snippet::show(&mut ctx, &codename, line, context)?,
            SnippetCommands::Add {
                codename,
                code,
                file,
                language,
                description,
            } => {
                let source = match (code, file) {
                    (Some(code), _) => SnippetSource::Inline(code),
                    (None, Some(path)) => SnippetSource::File(path),
                    (None, None) => anyhow::bail!("Provide the snippet with --code or --file"),
                };
                commands::snippet::add(&mut ctx, &codename, source, &language, &description)?;
            }
            SnippetCommands::Search { query } => commands::snippet::search(&mut ctx, &query)?,
            SnippetCommands::Clear => commands::snippet::clear(&mut ctx)?,
        },
        Commands::Preset { command } => match command {
            PresetCommands::Save { name } => commands::preset::save(&mut ctx, &name)?,
            PresetCommands::List => commands::preset::list(&ctx)?,
            PresetCommands::Load { id } => commands::preset::load(&mut ctx, id)?,
        },
        Commands::Theme { theme } => {
            commands::theme::run(&mut ctx, theme.map(Into::into))?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "cnref", &mut std::io::stdout());
        }
    }

    Ok(())
}
