//! folio - a static portfolio site generator.

mod build;
mod cli;
mod config;
mod data;
mod generator;
mod init;
mod query;
mod render;
mod serve;
mod utils;
mod watch;

use anyhow::{Context, Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use data::{ContentStore, init_content};
use init::new_site;
use query::run_query;
use serve::serve_site;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    init_config(load_config(cli)?);
    let config = cfg();

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { .. } => build_site(load_content(&config)?, &config),
        Commands::Serve { .. } => serve_site(load_content(&config)?),
        Commands::Query { query } => run_query(load_content(&config)?, query, config.build.featured),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;

    // Validate config state based on command
    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}

/// Load the portfolio data once for this process.
///
/// Any missing or malformed dataset aborts before anything is built.
fn load_content(config: &SiteConfig) -> Result<&'static ContentStore> {
    let dir = &config.build.data;
    let store = match ContentStore::load(dir) {
        Ok(store) => store,
        Err(e) if e.is_startup() => {
            return Err(e)
                .with_context(|| format!("Failed to load portfolio data from {}", dir.display()));
        }
        Err(e) => bail!(e),
    };
    Ok(init_content(store)?)
}
