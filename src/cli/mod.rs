//! CLI command logic - the terminal front end of the catalog browser
//!
//! Rendering lives in `render`, command flows in `commands`.

pub mod commands;
pub mod render;

use anyhow::Context;
use pokedex_browser::config::BrowserConfig;
use std::path::Path;

/// Load the config at `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<BrowserConfig> {
    match path {
        Some(path) => BrowserConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(BrowserConfig::default()),
    }
}

/// Print the effective config, or write it to `init` when given.
pub fn cmd_config(config: &BrowserConfig, init: Option<&Path>) -> anyhow::Result<()> {
    match init {
        Some(path) => {
            config
                .save(path)
                .with_context(|| format!("failed to write config to {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", config.to_toml()?),
    }
    Ok(())
}
