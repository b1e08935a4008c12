//! Compile-time platform detection for the definecheck toolchain.
//!
//! Classifies a compilation target along two independent axes from the set of
//! symbols a C toolchain predefines for it:
//! - **OS family:** Windows, or Linux as the assumed fallback
//! - **Architecture:** x86, amd64, 32/64-bit ARM, or unknown
//!
//! The classification is surfaced as build diagnostics and, through
//! [`build_script`], as constants resolved once per build.

pub mod arch;
pub mod build_script;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod matrix;
pub mod os;
pub mod symbols;
pub mod target;

pub use arch::{classify_arch, Architecture};
pub use config::DetectConfig;
pub use diagnostic::{detect, Detection, Diagnostic, GapPolicy};
pub use error::{DetectError, Result};
pub use os::{classify_os, OsFamily};
pub use symbols::{SymbolGroup, SymbolSet};
pub use target::TargetCfg;
