//! Config command handlers.

use anyhow::{Context, Result};
use vox_core::config::{self, Config};

pub fn path() -> Result<()> {
    println!("{}", config::paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn show(config: &Config) -> Result<()> {
    let toml = toml::to_string_pretty(config).context("serialize config")?;
    print!("{toml}");
    Ok(())
}
