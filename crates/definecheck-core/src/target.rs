//! Translation from Rust target configuration to predefined C symbols.
//!
//! Build scripts see the compilation target through `CARGO_CFG_TARGET_*`
//! variables. [`TargetCfg`] captures the subset the decision table needs and
//! reproduces the architecture and data-model symbols a GCC/Clang/MSVC
//! toolchain would predefine for the same target. Windows symbols follow
//! project convention instead of the compiler: `WIN32` is defined for every
//! Windows target although MSVC itself only predefines `_WIN32`.

use serde::{Deserialize, Serialize};

use crate::error::{DetectError, Result};
use crate::symbols::SymbolSet;

pub const ENV_TARGET_OS: &str = "CARGO_CFG_TARGET_OS";
pub const ENV_TARGET_ARCH: &str = "CARGO_CFG_TARGET_ARCH";
pub const ENV_TARGET_POINTER_WIDTH: &str = "CARGO_CFG_TARGET_POINTER_WIDTH";

/// Architectures with 64-bit pointers, by their `target_arch` name.
const ARCH_64: &[&str] = &[
    "x86_64",
    "aarch64",
    "arm64ec",
    "riscv64",
    "powerpc64",
    "mips64",
    "s390x",
    "sparc64",
    "loongarch64",
    "wasm64",
];

/// The target attributes the decision table depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetCfg {
    /// `target_os` value (e.g., "linux", "windows", "macos", "none").
    pub os: String,
    /// `target_arch` value (e.g., "x86", "x86_64", "arm", "aarch64").
    pub arch: String,
    /// `target_pointer_width` in bits.
    pub pointer_width: u32,
}

impl TargetCfg {
    pub fn new(os: impl Into<String>, arch: impl Into<String>, pointer_width: u32) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
            pointer_width,
        }
    }

    /// Read the target from the variables Cargo sets for build scripts.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Read the target through `lookup`, which maps a variable name to its value.
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let os = lookup(ENV_TARGET_OS).ok_or(DetectError::MissingEnv {
            name: ENV_TARGET_OS,
        })?;
        let arch = lookup(ENV_TARGET_ARCH).ok_or(DetectError::MissingEnv {
            name: ENV_TARGET_ARCH,
        })?;
        let pointer_width = match lookup(ENV_TARGET_POINTER_WIDTH) {
            Some(raw) => raw.trim().parse().map_err(|_| DetectError::InvalidValue {
                key: ENV_TARGET_POINTER_WIDTH.into(),
                value: raw.clone(),
            })?,
            None => default_pointer_width(&arch),
        };
        Ok(Self::new(os, arch, pointer_width))
    }

    /// Parse an `arch-vendor-os[-env]` target triple.
    pub fn from_triple(triple: &str) -> Result<Self> {
        let parts: Vec<&str> = triple.trim().split('-').collect();
        if parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
            return Err(DetectError::InvalidTriple {
                triple: triple.to_string(),
                detail: "expected arch-vendor-os[-env]".into(),
            });
        }

        let arch = normalize_arch(parts[0]).ok_or_else(|| DetectError::InvalidTriple {
            triple: triple.to_string(),
            detail: format!("unsupported architecture '{}'", parts[0]),
        })?;
        let os = triple_os(&parts[1..]);
        // x32 ABI: 64-bit instruction set with 32-bit pointers.
        let pointer_width = if parts.len() > 2 && parts[parts.len() - 1].ends_with("x32") {
            32
        } else {
            default_pointer_width(arch)
        };

        Ok(Self::new(os, arch, pointer_width))
    }

    /// The target this crate is being compiled for.
    pub fn host() -> Self {
        Self::new(
            std::env::consts::OS,
            std::env::consts::ARCH,
            usize::BITS,
        )
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// Symbols a C toolchain predefines for this target.
    pub fn predefined_symbols(&self) -> SymbolSet {
        let mut set = SymbolSet::new();

        if self.is_windows() {
            set.define("WIN32");
            if self.pointer_width == 64 {
                set.extend(["WIN64", "_WIN64"]);
            }
        } else if self.pointer_width == 64 {
            set.extend(["__LP64__", "_LP64"]);
        }

        match self.arch.as_str() {
            "x86" if self.is_windows() => set.extend(["_M_IX86", "_X86_"]),
            "x86" => set.extend(["i386", "__i386", "__i386__"]),
            "x86_64" if self.is_windows() => set.extend(["_M_AMD64", "_M_X64"]),
            "x86_64" => set.extend(["__amd64__", "__amd64", "__x86_64__", "__x86_64"]),
            "arm" if self.is_windows() => set.extend(["_M_ARM"]),
            "arm" => set.extend(["__arm__"]),
            "aarch64" if self.is_windows() => set.extend(["_M_ARM64"]),
            "aarch64" => set.extend(["__aarch64__"]),
            other => set.extend([format!("__{other}__")]),
        }

        tracing::trace!(cfg = ?self, %set, "translated target to symbols");
        set
    }
}

/// Normalize the architecture field of a triple to its `target_arch` name.
fn normalize_arch(raw: &str) -> Option<&'static str> {
    let arch = match raw {
        "i386" | "i486" | "i586" | "i686" | "x86" => "x86",
        "x86_64" | "amd64" | "x86_64h" => "x86_64",
        "aarch64" | "arm64" | "aarch64_be" => "aarch64",
        "arm64ec" => "arm64ec",
        a if a.starts_with("arm") || a.starts_with("thumb") => "arm",
        a if a.starts_with("riscv64") => "riscv64",
        a if a.starts_with("riscv32") => "riscv32",
        "powerpc" => "powerpc",
        "powerpc64" | "powerpc64le" => "powerpc64",
        "mips" | "mipsel" => "mips",
        "mips64" | "mips64el" => "mips64",
        "s390x" => "s390x",
        "sparc64" | "sparcv9" => "sparc64",
        "loongarch64" => "loongarch64",
        "wasm32" => "wasm32",
        "wasm64" => "wasm64",
        _ => return None,
    };
    Some(arch)
}

/// Pick the `target_os` value out of the vendor/os/env fields of a triple.
fn triple_os(rest: &[&str]) -> String {
    // android before linux: `armv7-linux-androideabi` is an Android target.
    const KNOWN: &[&str] = &[
        "windows", "android", "linux", "darwin", "macos", "ios", "freebsd", "netbsd",
        "openbsd", "dragonfly", "solaris", "illumos", "fuchsia", "redox", "wasi",
        "emscripten", "haiku", "hermit", "uefi", "none",
    ];
    for os in KNOWN {
        if rest.iter().any(|part| part.starts_with(*os)) {
            return match *os {
                "darwin" => "macos".into(),
                other => other.into(),
            };
        }
    }
    "none".into()
}

fn default_pointer_width(arch: &str) -> u32 {
    if ARCH_64.contains(&arch) {
        64
    } else {
        32
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::arch::{classify_arch, Architecture};
    use crate::os::{classify_os, OsFamily};

    fn classify(triple: &str) -> (OsFamily, Architecture) {
        let symbols = TargetCfg::from_triple(triple).unwrap().predefined_symbols();
        (classify_os(&symbols), classify_arch(&symbols))
    }

    #[test]
    fn parse_common_triples() {
        let t = TargetCfg::from_triple("x86_64-unknown-linux-gnu").unwrap();
        assert_eq!(t, TargetCfg::new("linux", "x86_64", 64));

        let t = TargetCfg::from_triple("i686-pc-windows-msvc").unwrap();
        assert_eq!(t, TargetCfg::new("windows", "x86", 32));

        let t = TargetCfg::from_triple("armv7-unknown-linux-gnueabihf").unwrap();
        assert_eq!(t, TargetCfg::new("linux", "arm", 32));

        let t = TargetCfg::from_triple("aarch64-apple-darwin").unwrap();
        assert_eq!(t, TargetCfg::new("macos", "aarch64", 64));

        let t = TargetCfg::from_triple("thumbv7em-none-eabihf").unwrap();
        assert_eq!(t, TargetCfg::new("none", "arm", 32));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(matches!(
            TargetCfg::from_triple("x86_64"),
            Err(DetectError::InvalidTriple { .. })
        ));
        assert!(TargetCfg::from_triple("x86_64--linux").is_err());
        assert!(TargetCfg::from_triple("z80-unknown-none").is_err());
    }

    #[test]
    fn classify_triples() {
        assert_eq!(
            classify("x86_64-unknown-linux-gnu"),
            (OsFamily::Linux, Architecture::Amd64)
        );
        assert_eq!(
            classify("x86_64-pc-windows-msvc"),
            (OsFamily::Windows, Architecture::Amd64)
        );
        assert_eq!(
            classify("i686-pc-windows-gnu"),
            (OsFamily::Windows, Architecture::X86)
        );
        assert_eq!(
            classify("i686-unknown-linux-gnu"),
            (OsFamily::Linux, Architecture::X86)
        );
        assert_eq!(
            classify("armv7-unknown-linux-gnueabihf"),
            (OsFamily::Linux, Architecture::Arm32)
        );
        assert_eq!(
            classify("thumbv7a-pc-windows-msvc"),
            (OsFamily::Windows, Architecture::Arm32)
        );
    }

    #[test]
    fn aarch64_falls_through() {
        // GCC and Clang define __aarch64__, not __arm__, on 64-bit ARM.
        assert_eq!(
            classify("aarch64-unknown-linux-gnu"),
            (OsFamily::Linux, Architecture::Unknown)
        );
        // MSVC defines _WIN64 on ARM64 too, and the table lists _WIN64 under amd64.
        assert_eq!(
            classify("aarch64-pc-windows-msvc"),
            (OsFamily::Windows, Architecture::Amd64)
        );
    }

    #[test]
    fn windows_symbols_follow_project_convention() {
        let symbols = TargetCfg::from_triple("i686-pc-windows-msvc")
            .unwrap()
            .predefined_symbols();
        assert!(symbols.is_defined("WIN32"));
        assert!(!symbols.is_defined("_WIN32"));
        assert!(!symbols.is_defined("WIN64"));
    }

    #[test]
    fn x32_abi_has_32_bit_pointers() {
        let t = TargetCfg::from_triple("x86_64-unknown-linux-gnux32").unwrap();
        assert_eq!(t, TargetCfg::new("linux", "x86_64", 32));
        let symbols = t.predefined_symbols();
        assert!(symbols.is_defined("__x86_64__"));
        assert!(!symbols.is_defined("__LP64__"));
        assert!(!symbols.is_defined("_LP64"));
    }

    #[test]
    fn os_field_resolution() {
        let t = TargetCfg::from_triple("armv7-linux-androideabi").unwrap();
        assert_eq!(t.os, "android");
        let t = TargetCfg::from_triple("aarch64-linux-android").unwrap();
        assert_eq!(t.os, "android");
        let t = TargetCfg::from_triple("armv7-sony-vita-newlibeabihf").unwrap();
        assert_eq!(t.os, "none");
        let t = TargetCfg::from_triple("wasm32-unknown-unknown").unwrap();
        assert_eq!(t.os, "none");
    }

    #[test]
    fn non_windows_non_linux_is_reported_as_linux() {
        assert_eq!(
            classify("x86_64-apple-darwin"),
            (OsFamily::Linux, Architecture::Amd64)
        );
        assert_eq!(
            classify("riscv64gc-unknown-linux-gnu"),
            (OsFamily::Linux, Architecture::Unknown)
        );
    }

    #[test]
    fn from_env_with_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_TARGET_OS, "windows"),
            (ENV_TARGET_ARCH, "x86_64"),
            (ENV_TARGET_POINTER_WIDTH, "64"),
        ]
        .into_iter()
        .collect();
        let t = TargetCfg::from_env_with(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(t, TargetCfg::new("windows", "x86_64", 64));
        let symbols = t.predefined_symbols();
        assert!(symbols.is_defined("WIN64"));
        assert!(symbols.is_defined("_M_X64"));
        assert!(!symbols.is_defined("__LP64__"));
    }

    #[test]
    fn from_env_missing_and_invalid() {
        let err = TargetCfg::from_env_with(|_| None).unwrap_err();
        assert!(matches!(err, DetectError::MissingEnv { name } if name == ENV_TARGET_OS));

        let err = TargetCfg::from_env_with(|k| match k {
            ENV_TARGET_POINTER_WIDTH => Some("wide".into()),
            _ => Some("linux".into()),
        })
        .unwrap_err();
        assert!(matches!(err, DetectError::InvalidValue { .. }));
    }

    #[test]
    fn pointer_width_defaults_from_arch() {
        let t = TargetCfg::from_env_with(|k| match k {
            ENV_TARGET_OS => Some("linux".into()),
            ENV_TARGET_ARCH => Some("aarch64".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(t.pointer_width, 64);
    }

    #[test]
    fn host_matches_consts() {
        let host = TargetCfg::host();
        assert_eq!(host.os, std::env::consts::OS);
        assert_eq!(host.pointer_width, usize::BITS);
    }
}
