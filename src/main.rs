//! Sponsorkit CLI
//!
//! Usage:
//!   sponsorkit [OPTIONS] --sponsors <FILE>
//!
//! Options:
//!   -c, --config <FILE>      Configuration file (TOML format)
//!   -s, --sponsors <FILE>    Sponsorship list (JSON array)
//!   -f, --format <FORMAT>    Output format, repeatable (svg, png, json)
//!   -o, --output-dir <DIR>   Directory the artifacts are written to
//!   -n, --name <NAME>        Base file name of the artifacts
//!   --force                  Ignore the sponsorship cache
//!   --strict                 Treat preset lint warnings as errors
//!   -v, --verbose            Increase log verbosity (repeatable)
//!   -h, --help               Print help

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::level_filters::LevelFilter;

use sponsorkit::{run, ConfigError, FsSink, JsonFileSource, OutputFormat, SponsorkitConfig};

#[derive(Parser)]
#[command(name = "sponsorkit")]
#[command(about = "Render sponsorship badge sheets as SVG, PNG and JSON")]
struct Cli {
    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sponsorship list (JSON array)
    #[arg(short, long)]
    sponsors: PathBuf,

    /// Output format; may be given several times
    #[arg(short, long = "format")]
    formats: Vec<OutputFormat>,

    /// Directory the artifacts are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Base file name of the artifacts
    #[arg(short, long)]
    name: Option<String>,

    /// Ignore the sponsorship cache
    #[arg(long)]
    force: bool,

    /// Treat preset lint warnings as errors
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match execute(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    let (config, config_text) = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read config '{}'", path.display()))?;
            match SponsorkitConfig::from_str(&text) {
                Ok(config) => (config, Some((text, path.display().to_string()))),
                Err(e) => return Ok(report_config_error(&e, &text, &path.display().to_string())),
            }
        }
        None => (SponsorkitConfig::new(), None),
    };

    let mut config = config.with_env_defaults();
    if !cli.formats.is_empty() {
        config = config.with_formats(cli.formats);
    }
    if let Some(dir) = cli.output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(name) = cli.name {
        config = config.with_name(name);
    }
    if cli.force {
        config = config.with_force(true);
    }
    if cli.strict {
        config = config.with_strict(true);
    }

    let config = match config.resolve() {
        Ok(config) => config,
        Err(e) => {
            let (text, filename) = config_text.unwrap_or_default();
            return Ok(report_config_error(&e, &text, &filename));
        }
    };

    let source = JsonFileSource::new(&cli.sponsors);
    let mut sink = FsSink::from_config(&config);
    let report = run(&config, &source, &mut sink)?;

    for (format, path) in &report.written {
        println!("{format}: {}", path.display());
    }
    if report.is_success() {
        return Ok(ExitCode::SUCCESS);
    }
    for (format, err) in &report.failures {
        eprintln!("Error: {format} output failed: {err}");
    }
    Ok(ExitCode::FAILURE)
}

fn report_config_error(err: &ConfigError, source: &str, filename: &str) -> ExitCode {
    eprintln!("{}", err.format(source, filename).trim_end());
    ExitCode::FAILURE
}
