//! horizon-stylelint CLI
//!
//! Usage: horizon-stylelint [OPTIONS] [PATHS]...

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use horizon_stylelint::rules::{all_rules, rule_description};
use horizon_stylelint::{CONFIG_FILE_NAME, Config, Diagnostic, Linter};
use tracing_subscriber::EnvFilter;

/// Lint SCSS, CSS and the <style> elements of markup files
#[derive(Parser, Debug)]
#[command(name = "horizon-stylelint")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Files or directories to lint
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Config file (defaults to the nearest .horizon-stylelint.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// More log output (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns whether any error-severity diagnostic was reported.
fn run(cli: &Cli) -> Result<bool> {
    if cli.list_rules {
        for name in all_rules() {
            println!("{name:<40} {}", rule_description(name).unwrap_or_default());
        }
        return Ok(false);
    }

    let config = load_config(cli)?;
    let linter = Linter::new(&config).context("invalid rule configuration")?;
    if linter.rules().next().is_none() {
        tracing::warn!("no rules enabled; add a [rules] table to {}", CONFIG_FILE_NAME);
    }

    let diagnostics = linter.lint_paths(&cli.paths)?;
    report(&diagnostics, cli.format)?;
    Ok(diagnostics.iter().any(Diagnostic::is_error))
}

fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(path) = &cli.config {
        return Ok(Config::load_from_path(path)?);
    }

    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    match Config::discover(&cwd)? {
        Some((path, config)) => {
            tracing::info!("using config {}", path.display());
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

fn report(diagnostics: &[Diagnostic], format: Format) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, diagnostics)?;
            writeln!(out)?;
        }
        Format::Text => {
            for diagnostic in diagnostics {
                writeln!(out, "{diagnostic}")?;
            }
            let errors = diagnostics.iter().filter(|d| d.is_error()).count();
            let warnings = diagnostics.len() - errors;
            if !diagnostics.is_empty() {
                writeln!(out, "\n{errors} error(s), {warnings} warning(s)")?;
            }
        }
    }
    Ok(())
}
