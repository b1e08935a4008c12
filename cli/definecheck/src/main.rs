//! definecheck CLI — evaluate the platform decision table from the command line.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use definecheck_core::GapPolicy;
use tracing_subscriber::EnvFilter;

use commands::OutputFormat;

#[derive(Parser)]
#[command(
    name = "definecheck",
    version,
    about = "Classify compilation targets by OS family and CPU architecture"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an explicit set of predefined symbols
    Check {
        /// Symbol to define (e.g., -D__x86_64__, -DWIN32=1)
        #[arg(short = 'D', value_name = "SYMBOL", allow_hyphen_values = true)]
        define: Vec<String>,
        #[command(flatten)]
        eval: EvalArgs,
    },
    /// Classify a Rust target triple (e.g., armv7-unknown-linux-gnueabihf)
    Target {
        /// Target triple
        triple: String,
        /// Also print the symbols the triple translates to
        #[arg(long)]
        show_symbols: bool,
        #[command(flatten)]
        eval: EvalArgs,
    },
    /// Show the classification this binary was built with
    Host {
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Print the decision table over every symbol group combination
    Matrix {
        /// Behavior when no architecture matches (silent, warn)
        #[arg(long, default_value = "silent")]
        gap_policy: GapPolicy,
    },
    /// List the recognized symbols by group
    Symbols,
}

#[derive(Args)]
struct EvalArgs {
    /// Configuration file (definecheck.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Behavior when no architecture matches (silent, warn)
    #[arg(long)]
    gap_policy: Option<GapPolicy>,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Check { define, eval } => commands::check::run(
            &define,
            eval.config.as_deref(),
            eval.gap_policy,
            eval.format,
        ),
        Commands::Target {
            triple,
            show_symbols,
            eval,
        } => commands::target::run(
            &triple,
            eval.config.as_deref(),
            eval.gap_policy,
            eval.format,
            show_symbols,
        ),
        Commands::Host { format } => commands::host::run(format),
        Commands::Matrix { gap_policy } => commands::matrix::run(gap_policy),
        Commands::Symbols => commands::symbols::run(),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_check_defines() {
        let cli = Cli::try_parse_from([
            "definecheck",
            "check",
            "-D__arm__",
            "-D",
            "__LP64__",
            "--gap-policy",
            "warn",
        ])
        .unwrap();
        match cli.command {
            Commands::Check { define, eval } => {
                assert_eq!(define, vec!["__arm__", "__LP64__"]);
                assert_eq!(eval.gap_policy, Some(GapPolicy::Warn));
                assert_eq!(eval.format, OutputFormat::Human);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn parse_rejects_bad_gap_policy() {
        assert!(Cli::try_parse_from(["definecheck", "matrix", "--gap-policy", "loud"]).is_err());
    }

    #[test]
    fn run_every_command() {
        run(Cli::try_parse_from(["definecheck", "symbols"]).unwrap()).unwrap();
        run(Cli::try_parse_from(["definecheck", "matrix"]).unwrap()).unwrap();
        run(Cli::try_parse_from(["definecheck", "host", "--format", "json"]).unwrap()).unwrap();
        run(Cli::try_parse_from(["definecheck", "target", "x86_64-pc-windows-msvc"]).unwrap())
            .unwrap();
        run(Cli::try_parse_from(["definecheck", "check", "-DWIN32"]).unwrap()).unwrap();
    }
}
