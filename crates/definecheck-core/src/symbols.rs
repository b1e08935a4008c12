//! Predefined toolchain symbols.
//!
//! A [`SymbolSet`] holds the names a compiler invocation defines for its
//! target. Only definedness matters; values given with `-DNAME=VALUE` are
//! discarded.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DetectError, Result};

/// Symbols identifying a Windows target.
pub const WINDOWS: &[&str] = &["WIN32", "WIN64"];

/// Symbols identifying a 32-bit x86 target.
pub const X86: &[&str] = &["i386", "__i386", "__i386__", "_M_IX86", "_X86_", "__X86__"];

/// Symbols identifying a 64-bit x86 (amd64) target.
pub const AMD64: &[&str] = &[
    "__amd64__",
    "__amd64",
    "__x86_64__",
    "__x86_64",
    "_M_AMD64",
    "_M_X64",
    "_WIN64",
    "WIN64",
];

/// Symbols identifying an ARM target.
pub const ARM: &[&str] = &["__arm__", "_M_ARM"];

/// Symbols identifying the LP64 data model.
pub const LP64: &[&str] = &["__LP64__", "_LP64"];

/// A named group of symbols consulted by the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolGroup {
    Windows,
    X86,
    Amd64,
    Arm,
    Lp64,
}

impl SymbolGroup {
    /// All groups, in decision-table order.
    pub const ALL: [SymbolGroup; 5] = [
        SymbolGroup::Windows,
        SymbolGroup::X86,
        SymbolGroup::Amd64,
        SymbolGroup::Arm,
        SymbolGroup::Lp64,
    ];

    /// The symbols belonging to this group.
    pub fn symbols(self) -> &'static [&'static str] {
        match self {
            SymbolGroup::Windows => WINDOWS,
            SymbolGroup::X86 => X86,
            SymbolGroup::Amd64 => AMD64,
            SymbolGroup::Arm => ARM,
            SymbolGroup::Lp64 => LP64,
        }
    }

    /// The first listed symbol, used when one stand-in for the group is needed.
    pub fn representative(self) -> &'static str {
        self.symbols()[0]
    }

    pub fn name(self) -> &'static str {
        match self {
            SymbolGroup::Windows => "windows",
            SymbolGroup::X86 => "x86",
            SymbolGroup::Amd64 => "amd64",
            SymbolGroup::Arm => "arm",
            SymbolGroup::Lp64 => "lp64",
        }
    }
}

impl fmt::Display for SymbolGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of symbols defined for one compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolSet {
    defined: BTreeSet<String>,
}

impl SymbolSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a symbol. Returns `false` if it was already defined.
    pub fn define(&mut self, name: impl Into<String>) -> bool {
        self.defined.insert(name.into())
    }

    /// Undefine a symbol. Returns `false` if it was not defined.
    pub fn undefine(&mut self, name: &str) -> bool {
        self.defined.remove(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.contains(name)
    }

    /// Whether any of `names` is defined.
    pub fn any_defined(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.is_defined(n))
    }

    /// Whether any symbol of `group` is defined.
    pub fn has_group(&self, group: SymbolGroup) -> bool {
        self.any_defined(group.symbols())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.defined.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.defined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defined.is_empty()
    }

    /// Build a set from compiler-style define arguments.
    ///
    /// Accepts `-DNAME`, `-DNAME=VALUE`, `NAME` and `NAME=VALUE`.
    pub fn parse_defines<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for arg in args {
            set.define(parse_define(arg.as_ref())?);
        }
        Ok(set)
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            defined: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for SymbolSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.defined.extend(iter.into_iter().map(Into::into));
    }
}

impl fmt::Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, name) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("}")
    }
}

/// Extract the symbol name from a single define argument.
pub fn parse_define(arg: &str) -> Result<String> {
    let trimmed = arg.trim();
    let body = trimmed.strip_prefix("-D").unwrap_or(trimmed);
    let name = body.split_once('=').map_or(body, |(name, _)| name);
    if !is_identifier(name) {
        return Err(DetectError::InvalidSymbol {
            name: arg.to_string(),
        });
    }
    Ok(name.to_string())
}

/// Whether `name` is a valid C identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_undefine() {
        let mut set = SymbolSet::new();
        assert!(set.define("WIN32"));
        assert!(!set.define("WIN32"));
        assert!(set.is_defined("WIN32"));
        assert!(set.undefine("WIN32"));
        assert!(!set.undefine("WIN32"));
        assert!(set.is_empty());
    }

    #[test]
    fn parse_define_forms() {
        let set =
            SymbolSet::parse_defines(["-D__x86_64__", "-D_WIN64=1", "WIN32", "__LP64__=1"])
                .unwrap();
        assert_eq!(set.len(), 4);
        assert!(set.is_defined("__x86_64__"));
        assert!(set.is_defined("_WIN64"));
        assert!(set.is_defined("WIN32"));
        assert!(set.is_defined("__LP64__"));
    }

    #[test]
    fn parse_define_rejects_bad_names() {
        assert!(matches!(
            parse_define("-D"),
            Err(DetectError::InvalidSymbol { .. })
        ));
        assert!(parse_define("1abc").is_err());
        assert!(parse_define("has space").is_err());
        assert!(parse_define("=1").is_err());
    }

    #[test]
    fn group_membership() {
        let set: SymbolSet = ["_M_IX86"].into_iter().collect();
        assert!(set.has_group(SymbolGroup::X86));
        assert!(!set.has_group(SymbolGroup::Amd64));
        assert!(!set.has_group(SymbolGroup::Windows));
    }

    #[test]
    fn win64_is_both_windows_and_amd64() {
        assert!(WINDOWS.contains(&"WIN64"));
        assert!(AMD64.contains(&"WIN64"));
    }

    #[test]
    fn display_is_sorted() {
        let set: SymbolSet = ["__arm__", "WIN32"].into_iter().collect();
        assert_eq!(set.to_string(), "{WIN32, __arm__}");
    }

    #[test]
    fn representatives() {
        assert_eq!(SymbolGroup::Windows.representative(), "WIN32");
        assert_eq!(SymbolGroup::Amd64.representative(), "__amd64__");
        assert_eq!(SymbolGroup::Lp64.representative(), "__LP64__");
    }
}
