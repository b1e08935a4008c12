//! `definecheck.toml` configuration and environment overrides.
//!
//! The file lives next to the crate manifest that runs the build script:
//!
//! ```toml
//! gap-policy = "warn"
//! define = ["_LP64"]
//! undefine = ["WIN64"]
//! emit-warnings = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostic::GapPolicy;
use crate::error::{DetectError, Result};
use crate::symbols::{parse_define, SymbolSet};

/// Configuration file name looked up by [`DetectConfig::discover`].
pub const CONFIG_FILE: &str = "definecheck.toml";

pub const ENV_GAP_POLICY: &str = "DEFINECHECK_GAP_POLICY";
pub const ENV_WARNINGS: &str = "DEFINECHECK_WARNINGS";
pub const ENV_DEFINE: &str = "DEFINECHECK_DEFINE";

/// Every environment variable that [`DetectConfig::apply_env_with`] reads.
pub const ENV_VARS: &[&str] = &[ENV_GAP_POLICY, ENV_WARNINGS, ENV_DEFINE];

/// Detection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DetectConfig {
    /// What to report when no architecture branch matches.
    #[serde(default)]
    pub gap_policy: GapPolicy,
    /// Extra symbols to define before classification.
    #[serde(default)]
    pub define: Vec<String>,
    /// Symbols to remove before classification. Applied after `define`.
    #[serde(default)]
    pub undefine: Vec<String>,
    /// Whether build scripts print diagnostics as Cargo warnings.
    #[serde(default = "default_emit_warnings")]
    pub emit_warnings: bool,
}

fn default_emit_warnings() -> bool {
    true
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            gap_policy: GapPolicy::default(),
            define: Vec::new(),
            undefine: Vec::new(),
            emit_warnings: default_emit_warnings(),
        }
    }
}

impl DetectConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DetectError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string and check symbol names.
    pub fn parse(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        for name in config.define.iter().chain(&config.undefine) {
            parse_define(name)?;
        }
        Ok(config)
    }

    /// Load `definecheck.toml` from `dir`, or the defaults if there is none.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Apply overrides read through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_GAP_POLICY) {
            self.gap_policy = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_WARNINGS) {
            self.emit_warnings = parse_bool(ENV_WARNINGS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_DEFINE) {
            for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                self.define.push(parse_define(item)?);
            }
        }
        Ok(())
    }

    /// Add `define` then remove `undefine` symbols.
    pub fn apply(&self, symbols: &mut SymbolSet) {
        symbols.extend(self.define.iter().cloned());
        for name in &self.undefine {
            symbols.undefine(name);
        }
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DetectError::InvalidValue {
            key: key.into(),
            value: raw.to_string(),
        }),
    }
}
