//! CLI entry point for subgrab.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use subgrab_core::{
    ConfigError, CrawlConfig, CrawlContext, CrawlError, FileConfig, Interrupt, RunOptions,
    RunStats, load_file_config,
};
use tracing::{debug, error, info, warn};

mod cli;

use cli::Args;

/// Exit code used when the user interrupts the run (128 + SIGINT).
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    init_tracing(&args);
    debug!(?args, "CLI arguments parsed");

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Priority: `RUST_LOG` env var > quiet flag > verbose flag > default (info).
fn init_tracing(args: &Args) {
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let file_config = match load_file_config(&args.config_file) {
        Ok(file_config) => file_config,
        Err(ConfigError::Read { path, source }) if !args.subreddits.is_empty() => {
            warn!(path = %path.display(), error = %source, "config file unreadable; using command-line subreddits only");
            FileConfig::default()
        }
        Err(err) => return Err(err).context("failed to load configuration"),
    };

    let options = RunOptions {
        subreddits: args.subreddits.clone(),
        sort: args.sort_mode(),
        pages: args.pages,
        directory: args.directory.clone(),
        dry_run: args.dry_run,
    };
    let config = CrawlConfig::resolve(file_config, options).context("invalid configuration")?;

    info!(sort = %config.sort, "using {} posts", config.sort);

    if config.dry_run {
        info!("dry run: images will be listed, not downloaded");
    } else if !config.directory.exists() {
        tokio::fs::create_dir_all(&config.directory)
            .await
            .with_context(|| format!("failed to create {}", config.directory.display()))?;
        info!(dir = %config.directory.display(), "Created output directory");
    }

    let interrupt = Interrupt::new();
    let interrupt_signal = interrupt.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt_signal.trigger();
        }
    });

    let ctx = CrawlContext::new(config, interrupt).context("failed to initialise HTTP clients")?;

    let mut stats = RunStats::default();
    let outcome = ctx.run(&mut stats).await;

    println!();
    println!("{stats}");

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(CrawlError::Interrupted) => {
            warn!(
                downloaded = stats.images_downloaded,
                "Interrupted. Run again to resume."
            );
            Ok(ExitCode::from(EXIT_INTERRUPTED))
        }
        Err(err) => Err(err.into()),
    }
}
