//! CPU architecture axis.
//!
//! Branches are checked in a fixed order and the first match wins: x86,
//! then amd64, then ARM. An ARM match is refined by the LP64 data model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symbols::{SymbolGroup, SymbolSet};

/// CPU architecture of a compilation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Architecture {
    X86,
    Amd64,
    /// ARM without the LP64 data model.
    Arm32,
    /// ARM with the LP64 data model.
    Arm64,
    /// No branch of the table matched.
    Unknown,
}

impl Architecture {
    pub const ALL: [Architecture; 5] = [
        Architecture::X86,
        Architecture::Amd64,
        Architecture::Arm32,
        Architecture::Arm64,
        Architecture::Unknown,
    ];

    /// Lowercase identifier used in cfg values.
    pub fn as_str(self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::Amd64 => "amd64",
            Architecture::Arm32 => "arm32",
            Architecture::Arm64 => "arm64",
            Architecture::Unknown => "unknown",
        }
    }

    /// Pointer width in bits, if the architecture is known.
    pub fn pointer_width(self) -> Option<u32> {
        match self {
            Architecture::X86 | Architecture::Arm32 => Some(32),
            Architecture::Amd64 | Architecture::Arm64 => Some(64),
            Architecture::Unknown => None,
        }
    }

    pub fn is_arm(self) -> bool {
        matches!(self, Architecture::Arm32 | Architecture::Arm64)
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the architecture from the defined symbols.
pub fn classify_arch(symbols: &SymbolSet) -> Architecture {
    if symbols.has_group(SymbolGroup::X86) {
        Architecture::X86
    } else if symbols.has_group(SymbolGroup::Amd64) {
        Architecture::Amd64
    } else if symbols.has_group(SymbolGroup::Arm) {
        if symbols.has_group(SymbolGroup::Lp64) {
            Architecture::Arm64
        } else {
            Architecture::Arm32
        }
    } else {
        Architecture::Unknown
    }
}
