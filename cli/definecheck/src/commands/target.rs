//! `definecheck target` — classify a Rust target triple.

use std::path::Path;

use anyhow::{Context, Result};
use definecheck_core::{GapPolicy, TargetCfg};

use super::OutputFormat;

/// Translate `triple` into the symbols a C toolchain predefines, then classify.
pub fn run(
    triple: &str,
    config: Option<&Path>,
    gap_policy: Option<GapPolicy>,
    format: OutputFormat,
    show_symbols: bool,
) -> Result<()> {
    let (symbols_line, report) = render(triple, config, gap_policy, format)?;
    if show_symbols {
        println!("symbols: {symbols_line}");
    }
    print!("{report}");
    Ok(())
}

/// Returns the translated symbol set and the rendered report.
pub fn render(
    triple: &str,
    config: Option<&Path>,
    gap_policy: Option<GapPolicy>,
    format: OutputFormat,
) -> Result<(String, String)> {
    let target = TargetCfg::from_triple(triple)
        .with_context(|| format!("cannot classify target '{triple}'"))?;
    tracing::debug!(?target, "parsed target triple");
    let symbols = target.predefined_symbols();
    let config = super::load_config(config, gap_policy)?;
    let symbols_line = symbols.to_string();
    Ok((symbols_line, super::evaluate(symbols, &config, format)?))
}
