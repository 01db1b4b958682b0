#![cfg_attr(test, allow(unused_crate_dependencies))]

use std::fs;

use anyhow::Context;
use args::LogLevel;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod config;

fn main() -> anyhow::Result<()> {
    let args = self::args::parse();
    let config = args.config()?;

    init_logging(args.log_level.or(config.log_level).unwrap_or_default());

    let sdl = fs::read_to_string(&args.schema)
        .with_context(|| format!("could not read the schema at {}", args.schema.display()))?;

    tracing::debug!(schema = %args.schema.display(), bytes = sdl.len(), "loaded schema");

    let output = commands::run(&args.command, &sdl, &config)?;
    println!("{output}");

    Ok(())
}

fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directives()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();

    tracing::debug!(%level, "logging initialized");
}
