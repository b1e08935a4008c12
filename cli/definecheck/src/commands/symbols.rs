//! `definecheck symbols` — list the recognized symbols.

use anyhow::Result;
use definecheck_core::SymbolGroup;

pub fn run() -> Result<()> {
    print!("{}", render());
    Ok(())
}

pub fn render() -> String {
    let mut out = String::new();
    for group in SymbolGroup::ALL {
        out.push_str(&format!("{:<8} {}\n", group.name(), group.symbols().join(" ")));
    }
    out
}
