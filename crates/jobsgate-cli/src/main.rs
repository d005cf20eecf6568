use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod output;

fn main() {
    if let Err(error) = run() {
        // GitHub Actions problem-matcher format: the annotation lands
        // next to the failing check in the review UI.
        eprintln!("::error::{error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = jobsgate_config::JobsgateConfig::load_with_dotenv()?;
    let flags = cli.global_flags();
    let project_root = resolve_project_root(flags.project.as_deref())?;

    match &cli.command {
        cli::Commands::Check(args) => commands::check::run(args, &flags, &config, &project_root),
        cli::Commands::Parse(args) => commands::parse::run(args, &flags, &config, &project_root),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("JOBSGATE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    match project_override {
        Some(path) => {
            let explicit = PathBuf::from(path);
            if explicit.is_dir() {
                Ok(explicit)
            } else {
                anyhow::bail!(
                    "invalid --project '{}': directory does not exist",
                    explicit.display()
                )
            }
        }
        None => std::env::current_dir().context("failed to read current directory"),
    }
}
