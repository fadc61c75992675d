// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record import

use anyhow::{bail, Context as _, Result};
use colored::Colorize;
use std::path::Path;

use cnref::catalog::parse_records;

use super::Context;
use crate::cli::OutputFormat;

/// Replace the working set with the records in `path` and persist them.
pub fn run(ctx: &mut Context, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read codename data from {}", path.display()))?;
    let records = parse_records(&content)
        .with_context(|| format!("Invalid codename data in {}", path.display()))?;

    if !ctx.service.replace_records(records) {
        bail!("Failed to persist imported records; the preference store may be unavailable");
    }
    let count = ctx.service.all().len();
    let roots = ctx.service.by_root().len();

    match ctx.format {
        OutputFormat::Json => ctx.print_json(&serde_json::json!({
            "imported": count,
            "roots": roots,
        }))?,
        OutputFormat::Text => println!(
            "{} Imported {} codenames in {} root groups",
            "✓".green(),
            count.to_string().cyan(),
            roots
        ),
    }
    Ok(())
}
