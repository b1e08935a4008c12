//! CLI command implementations.

pub mod check;
pub mod host;
pub mod matrix;
pub mod symbols;
pub mod target;

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use definecheck_core::{DetectConfig, Detection, GapPolicy, SymbolSet};

/// Output format shared by the evaluating commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `warning: <message>` lines, as a compiler would print them
    #[default]
    Human,
    /// A JSON object with the classification and messages
    Json,
}

/// Load the config file if one was given, then apply the gap policy override.
pub fn load_config(path: Option<&Path>, gap_policy: Option<GapPolicy>) -> Result<DetectConfig> {
    let mut config = match path {
        Some(path) => DetectConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DetectConfig::default(),
    };
    if let Some(policy) = gap_policy {
        config.gap_policy = policy;
    }
    tracing::debug!(?config, "effective configuration");
    Ok(config)
}

/// Apply `config` to `symbols`, classify, and render the result.
pub fn evaluate(mut symbols: SymbolSet, config: &DetectConfig, format: OutputFormat) -> Result<String> {
    config.apply(&mut symbols);
    let detection = definecheck_core::detect(&symbols);
    render(&detection, config.gap_policy, format)
}

/// Render a detection in the requested format.
pub fn render(detection: &Detection, policy: GapPolicy, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => {
            let mut out = String::new();
            for message in detection.messages(policy) {
                out.push_str("warning: ");
                out.push_str(message);
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => Ok(detection.to_json(policy)?),
    }
}
