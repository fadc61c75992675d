// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter preset management

use anyhow::{bail, Result};
use colored::Colorize;

use cnref::errors::PresetNotFoundError;
use cnref::{FilterCriteria, FilterPreset};

use super::Context;
use crate::cli::OutputFormat;

/// Snapshot the stored filter state under `name`.
pub fn save(ctx: &mut Context, name: &str) -> Result<()> {
    let prefs = ctx.service.prefs_mut();
    let mut criteria = prefs.load_filter_state(FilterCriteria::default());
    let mut presets = prefs.load_presets();
    let id = presets.iter().map(|p| p.id).max().unwrap_or(0) + 1;

    let Some(preset) = FilterPreset::capture(id, name, &criteria) else {
        bail!("Preset name must not be empty\n\nExample: cnref preset save \"only events\"");
    };
    presets.push(preset.clone());
    if !prefs.save_presets(&presets) {
        bail!("Failed to save preset; the preference store may be unavailable");
    }
    criteria.active_preset = Some(id);
    prefs.save_filter_state(&criteria);

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&preset)?,
        OutputFormat::Text => {
            println!("{} Saved preset {} as #{}", "✓".green(), preset.name.yellow(), id)
        }
    }
    Ok(())
}

/// Run the preset list command
pub fn list(ctx: &Context) -> Result<()> {
    let presets = ctx.service.prefs().load_presets();
    let active = ctx
        .service
        .prefs()
        .load_filter_state(FilterCriteria::default())
        .active_preset;

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&presets)?,
        OutputFormat::Text => {
            if presets.is_empty() {
                println!("{} No saved presets", "✗".red());
            }
            for preset in &presets {
                let marker = if active == Some(preset.id) { "*" } else { " " };
                let text = if preset.search_text.is_empty() {
                    String::new()
                } else {
                    format!(" text={:?}", preset.search_text)
                };
                println!("{} #{} {}{}", marker, preset.id, preset.name.yellow(), text);
            }
        }
    }
    Ok(())
}

/// Make preset `id` the stored filter state.
pub fn load(ctx: &mut Context, id: u64) -> Result<()> {
    let prefs = ctx.service.prefs_mut();
    let presets = prefs.load_presets();
    let preset = presets
        .iter()
        .find(|p| p.id == id)
        .ok_or(PresetNotFoundError { id })?;

    let mut criteria = prefs.load_filter_state(FilterCriteria::default());
    criteria.apply_preset(preset);
    prefs.save_filter_state(&criteria);
    let name = preset.name.clone();

    let matched = ctx.service.filter(&criteria).len();
    match ctx.format {
        OutputFormat::Json => ctx.print_json(&serde_json::json!({
            "id": id,
            "name": name,
            "matched": matched,
        }))?,
        OutputFormat::Text => println!(
            "{} Loaded preset {} ({} codenames match)",
            "✓".green(),
            name.yellow(),
            matched.to_string().cyan()
        ),
    }
    Ok(())
}
