//! Build-script integration.
//!
//! Resolves the decision table once per build for the real compilation
//! target, prints the diagnostics as Cargo warnings and exposes the result
//! both as `cfg` values and as generated constants:
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     if let Err(e) = definecheck_core::build_script::run() {
//!         panic!("definecheck: {e}");
//!     }
//! }
//! ```

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{DetectConfig, CONFIG_FILE, ENV_VARS};
use crate::diagnostic::{detect, Detection};
use crate::error::{DetectError, Result};
use crate::target::{TargetCfg, ENV_TARGET_ARCH, ENV_TARGET_OS, ENV_TARGET_POINTER_WIDTH};
use crate::{Architecture, OsFamily};

/// cfg name carrying the OS family.
pub const CFG_OS: &str = "definecheck_os";
/// cfg name carrying the architecture.
pub const CFG_ARCH: &str = "definecheck_arch";
/// File written into `OUT_DIR`.
pub const GENERATED_FILE: &str = "definecheck.rs";

/// A single instruction to Cargo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Warning(String),
    RustcCfg(String),
    RustcCheckCfg(String),
    RerunIfChanged(PathBuf),
    RerunIfEnvChanged(String),
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Warning(msg) => write!(f, "cargo:warning={msg}"),
            Directive::RustcCfg(cfg) => write!(f, "cargo:rustc-cfg={cfg}"),
            Directive::RustcCheckCfg(cfg) => write!(f, "cargo:rustc-check-cfg={cfg}"),
            Directive::RerunIfChanged(path) => {
                write!(f, "cargo:rerun-if-changed={}", path.display())
            }
            Directive::RerunIfEnvChanged(var) => write!(f, "cargo:rerun-if-env-changed={var}"),
        }
    }
}

/// Ordered Cargo directives produced by a build script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    pub directives: Vec<Directive>,
}

impl BuildOutput {
    pub fn push(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.directives.iter().filter_map(|d| match d {
            Directive::Warning(msg) => Some(msg.as_str()),
            _ => None,
        })
    }

    /// Write one directive per line.
    pub fn emit<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for directive in &self.directives {
            writeln!(out, "{directive}")?;
        }
        out.flush()
    }
}

/// Directives for a detection: warnings, cfg values and their declarations.
pub fn plan(detection: &Detection, config: &DetectConfig) -> BuildOutput {
    let mut out = BuildOutput::default();

    if config.emit_warnings {
        for diagnostic in detection.diagnostics(config.gap_policy) {
            out.push(Directive::Warning(diagnostic.message().to_string()));
        }
    }

    out.push(Directive::RustcCheckCfg(check_cfg(
        CFG_OS,
        [OsFamily::Windows, OsFamily::Linux].map(OsFamily::as_str),
    )));
    out.push(Directive::RustcCheckCfg(check_cfg(
        CFG_ARCH,
        Architecture::ALL.map(Architecture::as_str),
    )));
    out.push(Directive::RustcCfg(format!(
        "{CFG_OS}=\"{}\"",
        detection.os.as_str()
    )));
    out.push(Directive::RustcCfg(format!(
        "{CFG_ARCH}=\"{}\"",
        detection.arch.as_str()
    )));

    out
}

fn check_cfg<const N: usize>(name: &str, values: [&str; N]) -> String {
    let values: Vec<String> = values.iter().map(|v| format!("\"{v}\"")).collect();
    format!("cfg({name}, values({}))", values.join(", "))
}

/// Rust source declaring `OS`, `ARCH` and `DIAGNOSTICS` for `include!`.
pub fn generate_consts(detection: &Detection, config: &DetectConfig) -> String {
    let diagnostics: Vec<String> = detection
        .diagnostics(config.gap_policy)
        .iter()
        .map(|d| format!("::definecheck_core::Diagnostic::{d:?}"))
        .collect();

    format!(
        "// @generated by definecheck_core::build_script\n\
         /// OS family of the compilation target.\n\
         pub const OS: ::definecheck_core::OsFamily = ::definecheck_core::OsFamily::{:?};\n\
         /// Architecture of the compilation target.\n\
         pub const ARCH: ::definecheck_core::Architecture = ::definecheck_core::Architecture::{:?};\n\
         /// Diagnostics emitted while building this crate.\n\
         pub const DIAGNOSTICS: &[::definecheck_core::Diagnostic] = &[{}];\n\
         /// Symbols the classification was made from.\n\
         pub const SYMBOLS: &[&str] = &[{}];\n",
        detection.os,
        detection.arch,
        diagnostics.join(", "),
        detection
            .symbols
            .iter()
            .map(|s| format!("{s:?}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Detect the current compilation target from inside a build script.
///
/// Reads the target from Cargo, the configuration from
/// `$CARGO_MANIFEST_DIR/definecheck.toml` plus environment overrides, prints
/// the directives to stdout and writes `$OUT_DIR/definecheck.rs`.
pub fn run() -> Result<Detection> {
    let manifest_dir = env_path("CARGO_MANIFEST_DIR")?;
    let out_dir = env_path("OUT_DIR")?;

    let target = TargetCfg::from_env()?;
    let mut config = DetectConfig::discover(&manifest_dir)?;
    config.apply_env()?;

    let mut symbols = target.predefined_symbols();
    config.apply(&mut symbols);
    let detection = detect(&symbols);

    let mut out = plan(&detection, &config);
    for var in rerun_env_vars() {
        out.push(Directive::RerunIfEnvChanged(var.to_string()));
    }
    let config_path = manifest_dir.join(CONFIG_FILE);
    if config_path.is_file() {
        out.push(Directive::RerunIfChanged(config_path));
    }
    out.emit(std::io::stdout().lock())?;

    write_consts(&out_dir, &detection, &config)?;
    Ok(detection)
}

/// Write the generated constants into `out_dir`.
pub fn write_consts(out_dir: &Path, detection: &Detection, config: &DetectConfig) -> Result<PathBuf> {
    let path = out_dir.join(GENERATED_FILE);
    std::fs::write(&path, generate_consts(detection, config))?;
    Ok(path)
}

fn rerun_env_vars() -> impl Iterator<Item = &'static str> {
    [ENV_TARGET_OS, ENV_TARGET_ARCH, ENV_TARGET_POINTER_WIDTH]
        .into_iter()
        .chain(ENV_VARS.iter().copied())
}

fn env_path(name: &'static str) -> Result<PathBuf> {
    std::env::var_os(name)
        .map(PathBuf::from)
        .ok_or(DetectError::MissingEnv { name })
}
