// SPDX-License-Identifier: MIT OR Apache-2.0

//! Theme preference

use anyhow::Result;
use colored::Colorize;

use cnref::prefs::Theme;

use super::Context;
use crate::cli::OutputFormat;

/// Show the stored theme, or store a new one
pub fn run(ctx: &mut Context, theme: Option<Theme>) -> Result<()> {
    if let Some(theme) = theme {
        if !ctx.service.prefs_mut().save_theme(theme) {
            eprintln!("{} Theme not persisted; using it for this run only", "!".yellow());
        }
    }
    let current = theme.unwrap_or_else(|| ctx.service.prefs().load_theme());

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&serde_json::json!({ "theme": current }))?,
        OutputFormat::Text => println!("theme: {}", current.to_string().color(ctx.palette().accent)),
    }
    Ok(())
}
