//! Build-time platform classification of the current compilation target.
//!
//! The build script evaluates the decision table once and prints its
//! diagnostics to the build log. The result is available here as constants
//! and to dependent code through the `definecheck_os` and `definecheck_arch`
//! cfg values set on this crate.

pub use definecheck_core::{Architecture, Diagnostic, OsFamily};

include!(concat!(env!("OUT_DIR"), "/definecheck.rs"));

/// The OS family and architecture this crate was built for.
pub const fn current() -> (OsFamily, Architecture) {
    (OS, ARCH)
}

/// Messages printed to the build log, in order.
pub fn messages() -> impl Iterator<Item = &'static str> {
    DIAGNOSTICS.iter().map(|d| d.message())
}
