//! `definecheck host` — the classification this binary was built with.

use anyhow::Result;
use definecheck_platform::{ARCH, DIAGNOSTICS, OS, SYMBOLS};

use super::OutputFormat;

/// Print the build-time constants of the compilation target.
pub fn run(format: OutputFormat) -> Result<()> {
    print!("{}", render(format)?);
    Ok(())
}

pub fn render(format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => {
            let mut out = format!("OS:           {OS}\nArchitecture: {ARCH}\n");
            if let Some(width) = ARCH.pointer_width() {
                out.push_str(&format!("Pointer size: {width} bits\n"));
            }
            out.push_str(&format!("Symbols:      {}\n", SYMBOLS.join(" ")));
            out.push_str("Build diagnostics:\n");
            for message in definecheck_platform::messages() {
                out.push_str(&format!("  {message}\n"));
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "os": OS,
                "arch": ARCH,
                "symbols": SYMBOLS,
                "diagnostics": DIAGNOSTICS.iter().map(|d| d.message()).collect::<Vec<_>>(),
            });
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_lists_diagnostics() {
        let out = render(OutputFormat::Human).unwrap();
        assert!(out.starts_with(&format!("OS:           {OS}\n")));
        for d in DIAGNOSTICS {
            assert!(out.contains(d.message()));
        }
    }

    #[test]
    fn json_matches_consts() {
        let json: serde_json::Value =
            serde_json::from_str(&render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["os"], OS.as_str());
        assert_eq!(json["arch"], ARCH.as_str());
    }
}
