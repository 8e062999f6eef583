mod args;
mod commands;

use anyhow::{Context, Result};
use chamber::Chamber;
use chamber::domain::config::{ChamberConfig, LoggingConfig};
use chamber::kernel::config::load_config;
use chamber_logger::{LevelFilter, LogFormat, Logger};
use clap::Parser;
use tracing::info;

fn main() -> Result<()> {
    let cli = args::Cli::parse();

    let cfg: ChamberConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;

    // The subscriber depends on the loaded config, so loading is reported here.
    let _log = init_logger(&cfg.logging)?;
    info!(
        config = ?cli.config,
        site_id = cfg.site_id,
        domains = cfg.domains.len(),
        "Configuration loaded"
    );

    let chamber = Chamber::builder().config(cfg).build()?;

    commands::run(&chamber, cli.command, &mut std::io::stdout().lock())
}

fn init_logger(cfg: &LoggingConfig) -> Result<Logger> {
    let level: LevelFilter =
        cfg.level.parse().with_context(|| format!("Invalid log level '{}'", cfg.level))?;
    let format: LogFormat = cfg.format.parse()?;

    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).format(format);
    let builder = match &cfg.env_filter {
        Some(filter) => builder.env_filter(filter),
        None => builder,
    };

    let logger = match &cfg.directory {
        Some(directory) => builder.path(directory).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
