//! Diagnostics emitted for a classified target.
//!
//! Each compilation yields exactly one OS diagnostic followed by the
//! architecture diagnostics of the branch that matched. When no architecture
//! branch matches, the [`GapPolicy`] decides between silence and an explicit
//! "not recognized" message.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::arch::{classify_arch, Architecture};
use crate::error::{DetectError, Result};
use crate::os::{classify_os, OsFamily};
use crate::symbols::SymbolSet;

/// A build-log message describing part of the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diagnostic {
    Windows,
    Linux,
    X86,
    Amd64,
    Arm,
    Lp64,
    /// ARM target without the LP64 data model.
    UnknownArchitecture,
    /// No architecture branch matched; only under [`GapPolicy::Warn`].
    Unrecognized,
}

impl Diagnostic {
    /// The message text as it appears in the build log.
    pub fn message(self) -> &'static str {
        match self {
            Diagnostic::Windows => "This is Windows",
            Diagnostic::Linux => "This is Linux",
            Diagnostic::X86 => "This is x86",
            Diagnostic::Amd64 => "This is amd64",
            Diagnostic::Arm => "This is ARM",
            Diagnostic::Lp64 => "This is LP",
            Diagnostic::UnknownArchitecture => "I don't know what architecture this is",
            Diagnostic::Unrecognized => "This architecture is not recognized",
        }
    }

    pub fn is_os(self) -> bool {
        matches!(self, Diagnostic::Windows | Diagnostic::Linux)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// What to report when no architecture branch matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapPolicy {
    /// Emit no architecture diagnostic at all.
    #[default]
    Silent,
    /// Emit [`Diagnostic::Unrecognized`].
    Warn,
}

impl FromStr for GapPolicy {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silent" => Ok(GapPolicy::Silent),
            "warn" => Ok(GapPolicy::Warn),
            _ => Err(DetectError::InvalidValue {
                key: "gap-policy".into(),
                value: s.to_string(),
            }),
        }
    }
}

/// The outcome of classifying one symbol set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub os: OsFamily,
    pub arch: Architecture,
    /// The symbols the classification was made from.
    pub symbols: SymbolSet,
}

/// Classify a symbol set along both axes.
pub fn detect(symbols: &SymbolSet) -> Detection {
    let os = classify_os(symbols);
    let arch = classify_arch(symbols);
    tracing::debug!(%symbols, %os, %arch, "classified target");
    Detection {
        os,
        arch,
        symbols: symbols.clone(),
    }
}

impl Detection {
    /// The diagnostics for this detection, OS first.
    pub fn diagnostics(&self, policy: GapPolicy) -> Vec<Diagnostic> {
        let mut out = Vec::with_capacity(3);
        out.push(match self.os {
            OsFamily::Windows => Diagnostic::Windows,
            OsFamily::Linux => Diagnostic::Linux,
        });
        match self.arch {
            Architecture::X86 => out.push(Diagnostic::X86),
            Architecture::Amd64 => out.push(Diagnostic::Amd64),
            Architecture::Arm64 => out.extend([Diagnostic::Arm, Diagnostic::Lp64]),
            Architecture::Arm32 => {
                out.extend([Diagnostic::Arm, Diagnostic::UnknownArchitecture])
            }
            Architecture::Unknown => {
                if policy == GapPolicy::Warn {
                    out.push(Diagnostic::Unrecognized);
                }
            }
        }
        out
    }

    /// Messages of [`Detection::diagnostics`].
    pub fn messages(&self, policy: GapPolicy) -> Vec<&'static str> {
        self.diagnostics(policy)
            .into_iter()
            .map(Diagnostic::message)
            .collect()
    }

    /// One-line description, e.g. `Linux/amd64`.
    pub fn summary(&self) -> String {
        format!("{}/{}", self.os, self.arch)
    }

    /// JSON report with the diagnostics for `policy`.
    pub fn to_json(&self, policy: GapPolicy) -> Result<String> {
        let report = serde_json::json!({
            "os": self.os,
            "arch": self.arch,
            "symbols": self.symbols,
            "diagnostics": self.messages(policy),
        });
        Ok(serde_json::to_string_pretty(&report)?)
    }
}
