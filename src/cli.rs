// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use cnref::grouping::{SortDirection, SortKey};
use cnref::prefs::Theme;
use cnref::snippets::DEFAULT_CONTEXT_LINES;
use cnref::CodenameType;

/// cnref - Codename reference explorer
///
/// Browse a naming-convention taxonomy grouped by root term, narrow it with
/// type/root/text filters, and search it with match highlighting.
#[derive(Parser, Debug)]
#[command(name = "cnref")]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "Quickstart:\n  cnref list -t function\n  cnref s load --whole-word\n  cnref groups --all"
)]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Compact JSON output (no pretty formatting)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Preference file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Keep preferences in memory only for this run
    #[arg(long, global = true)]
    pub no_persist: bool,

    /// JSON array of codenames to use instead of the built-in catalog
    /// (ignored once records have been imported)
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Codename type filter values
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliType {
    Function,
    Variable,
    Class,
    Parameter,
    Constant,
    Event,
    Property,
    File,
}

impl From<CliType> for CodenameType {
    fn from(value: CliType) -> Self {
        match value {
            CliType::Function => CodenameType::Function,
            CliType::Variable => CodenameType::Variable,
            CliType::Class => CodenameType::Class,
            CliType::Parameter => CodenameType::Parameter,
            CliType::Constant => CodenameType::Constant,
            CliType::Event => CodenameType::Event,
            CliType::Property => CodenameType::Property,
            CliType::File => CodenameType::File,
        }
    }
}

/// Sort field for record lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliSortKey {
    Name,
    Type,
    Root,
}

impl From<CliSortKey> for SortKey {
    fn from(value: CliSortKey) -> Self {
        match value {
            CliSortKey::Name => SortKey::Name,
            CliSortKey::Type => SortKey::Type,
            CliSortKey::Root => SortKey::Root,
        }
    }
}

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliTheme {
    Light,
    Dark,
}

impl From<CliTheme> for Theme {
    fn from(value: CliTheme) -> Self {
        match value {
            CliTheme::Light => Theme::Light,
            CliTheme::Dark => Theme::Dark,
        }
    }
}

/// Sort flags shared by list-style commands
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct SortArgs {
    /// Sort records by field (defaults to the saved preference)
    #[arg(short = 's', long, value_enum)]
    pub sort: Option<CliSortKey>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

impl SortArgs {
    /// Direction implied by the flags, if any were given
    pub fn direction(&self) -> Option<SortDirection> {
        if self.desc {
            Some(SortDirection::Desc)
        } else if self.sort.is_some() {
            Some(SortDirection::Asc)
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum PresetCommands {
    /// Save the stored filter state as a named preset
    Save {
        /// Preset name
        name: String,
    },

    /// List saved presets
    #[command(visible_aliases = ["ls"])]
    List,

    /// Make a preset the stored filter state
    Load {
        /// Preset id from `preset list`
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum FilterCommands {
    /// Show the stored filter state
    Show,

    /// Toggle a type in the stored filter state
    Type {
        #[arg(value_enum)]
        kind: CliType,
    },

    /// Toggle a root term in the stored filter state
    Root {
        /// Root term
        root: String,
    },

    /// Enable every type and root and clear the text filter
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum SnippetCommands {
    /// Show the snippets of a codename
    Show {
        /// Codename
        codename: String,

        /// Focus on this line (1-based) with surrounding context
        #[arg(short = 'l', long)]
        line: Option<usize>,

        /// Lines of context around --line
        #[arg(short = 'C', long, default_value_t = DEFAULT_CONTEXT_LINES)]
        context: usize,
    },

    /// Save a snippet for a codename
    Add {
        /// Codename
        codename: String,

        /// Snippet source
        #[arg(long, required_unless_present = "file", conflicts_with = "file")]
        code: Option<String>,

        /// Read the snippet source from a file
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Language of the snippet
        #[arg(long, default_value = "javascript")]
        language: String,

        /// Short description
        #[arg(short = 'd', long, default_value = "")]
        description: String,
    },

    /// Find snippets whose code or description contains text
    Search {
        /// Text to look for (case-sensitive)
        query: String,
    },

    /// Forget all saved snippets
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List codenames through the type/root/text filter
    #[command(visible_aliases = ["l", "ls"])]
    List {
        /// Only these types (repeatable)
        #[arg(short = 't', long = "type", value_enum)]
        types: Vec<CliType>,

        /// Only these root terms (repeatable)
        #[arg(short = 'r', long = "root")]
        roots: Vec<String>,

        /// Hide these root terms (repeatable)
        #[arg(short = 'x', long = "exclude-root")]
        exclude_roots: Vec<String>,

        /// Text that must appear in the name or description
        #[arg(short = 'q', long)]
        query: Option<String>,

        /// Case-sensitive text matching
        #[arg(long)]
        case_sensitive: bool,

        /// Match the text against whole terms only
        #[arg(short = 'w', long)]
        whole_word: bool,

        /// Start from the stored filter state instead of defaults
        #[arg(long)]
        saved: bool,

        /// Store the resulting filter state and sort order
        #[arg(long)]
        save: bool,

        #[command(flatten)]
        sort: SortArgs,
    },

    /// Show codenames grouped by root term
    #[command(visible_aliases = ["g"])]
    Groups {
        /// Show the records of every group, not only expanded ones
        #[arg(short = 'a', long)]
        all: bool,

        #[command(flatten)]
        sort: SortArgs,
    },

    /// Expand a root group
    Expand {
        /// Root term
        root: String,
    },

    /// Collapse a root group
    Collapse {
        /// Root term
        root: String,
    },

    /// Search codename names
    #[command(visible_aliases = ["s", "find"])]
    Search {
        /// Search query
        query: String,

        /// Case-sensitive matching
        #[arg(long)]
        case_sensitive: bool,

        /// Match whole terms only
        #[arg(short = 'w', long)]
        whole_word: bool,

        /// Page to show (1-based)
        #[arg(short = 'p', long, default_value = "1")]
        page: usize,

        /// Results per page
        #[arg(short = 'n', long)]
        page_size: Option<usize>,
    },

    /// Suggest recent queries containing a prefix
    Suggest {
        /// Text to look for in recent queries
        #[arg(default_value = "")]
        prefix: String,
    },

    /// Show or clear recent queries
    History {
        /// Forget all recent queries
        #[arg(long)]
        clear: bool,
    },

    /// Term frequency table
    Terms {
        /// Show only the N most frequent terms
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Terms that co-occur with a term
    Related {
        /// Term to look up
        term: String,
    },

    /// Compare the terms of two codenames
    Compare {
        /// First codename
        a: String,
        /// Second codename
        b: String,
    },

    /// Inspect or change the stored filter state
    Filter {
        #[command(subcommand)]
        command: FilterCommands,
    },

    /// Replace the working set with records from a JSON file and keep them
    Import {
        /// JSON array of codenames
        path: PathBuf,
    },

    /// Code snippets attached to codenames
    #[command(visible_aliases = ["snip"])]
    Snippet {
        #[command(subcommand)]
        command: SnippetCommands,
    },

    /// Manage filter presets
    Preset {
        #[command(subcommand)]
        command: PresetCommands,
    },

    /// Show or set the display theme
    Theme {
        #[arg(value_enum)]
        theme: Option<CliTheme>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
