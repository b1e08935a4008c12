//! `definecheck matrix` — the full decision table.

use anyhow::Result;
use definecheck_core::matrix;
use definecheck_core::GapPolicy;

/// Print every combination of group representatives and its diagnostics.
pub fn run(policy: GapPolicy) -> Result<()> {
    print!("{}", render(policy));
    Ok(())
}

pub fn render(policy: GapPolicy) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<44} {:<8} {:<8} {}\n",
        "SYMBOLS", "OS", "ARCH", "DIAGNOSTICS"
    ));
    for row in matrix::evaluate() {
        let symbols = row.detection.symbols.to_string();
        out.push_str(&format!(
            "{:<44} {:<8} {:<8} {}\n",
            symbols,
            row.detection.os.to_string(),
            row.detection.arch.to_string(),
            row.detection.messages(policy).join(" | ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_combination() {
        let out = render(GapPolicy::Silent);
        assert_eq!(out.lines().count(), 33);
        assert!(out.lines().nth(1).unwrap().starts_with("{} "));
        assert!(out.contains("This is Linux | This is ARM | I don't know what architecture this is"));
    }

    #[test]
    fn warn_policy_marks_gap() {
        let out = render(GapPolicy::Warn);
        assert!(out.contains("This is Linux | This architecture is not recognized"));
    }
}
