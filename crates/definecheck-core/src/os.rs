//! OS family axis.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symbols::{SymbolGroup, SymbolSet};

/// Operating system family of a compilation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OsFamily {
    Windows,
    /// Assumed whenever no Windows symbol is defined.
    Linux,
}

impl OsFamily {
    /// Lowercase identifier used in cfg values.
    pub fn as_str(self) -> &'static str {
        match self {
            OsFamily::Windows => "windows",
            OsFamily::Linux => "linux",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Windows => f.write_str("Windows"),
            OsFamily::Linux => f.write_str("Linux"),
        }
    }
}

/// Classify the OS family from the defined symbols.
pub fn classify_os(symbols: &SymbolSet) -> OsFamily {
    if symbols.has_group(SymbolGroup::Windows) {
        OsFamily::Windows
    } else {
        OsFamily::Linux
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_symbols() {
        for name in ["WIN32", "WIN64"] {
            let set: SymbolSet = [name].into_iter().collect();
            assert_eq!(classify_os(&set), OsFamily::Windows, "{name}");
        }
    }

    #[test]
    fn fallback_is_linux() {
        assert_eq!(classify_os(&SymbolSet::new()), OsFamily::Linux);
        // _WIN32 and _WIN64 are not in the Windows group.
        let set: SymbolSet = ["_WIN32", "_WIN64", "__APPLE__"].into_iter().collect();
        assert_eq!(classify_os(&set), OsFamily::Linux);
    }

    #[test]
    fn display() {
        assert_eq!(OsFamily::Windows.to_string(), "Windows");
        assert_eq!(OsFamily::Linux.as_str(), "linux");
    }
}
