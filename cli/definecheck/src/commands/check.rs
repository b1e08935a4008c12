//! `definecheck check` — classify an explicit symbol set.

use std::path::Path;

use anyhow::{Context, Result};
use definecheck_core::{GapPolicy, SymbolSet};

use super::OutputFormat;

/// Classify the symbols given as `-D` arguments and print the diagnostics.
pub fn run(
    defines: &[String],
    config: Option<&Path>,
    gap_policy: Option<GapPolicy>,
    format: OutputFormat,
) -> Result<()> {
    print!("{}", render(defines, config, gap_policy, format)?);
    Ok(())
}

pub fn render(
    defines: &[String],
    config: Option<&Path>,
    gap_policy: Option<GapPolicy>,
    format: OutputFormat,
) -> Result<String> {
    let symbols = SymbolSet::parse_defines(defines).context("invalid define")?;
    tracing::debug!(%symbols, "checking symbol set");
    let config = super::load_config(config, gap_policy)?;
    super::evaluate(symbols, &config, format)
}
