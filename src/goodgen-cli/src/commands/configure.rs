//! Configuration command handlers

use std::path::PathBuf;

use anyhow::Result;

use crate::config::Config;

/// Handle the configure command
pub fn handle(
    data_url: Option<String>,
    textures_url: Option<String>,
    frontend: Option<PathBuf>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config)?;
        return Ok(());
    }

    if data_url.is_none() && textures_url.is_none() && frontend.is_none() {
        show_usage();
        return Ok(());
    }

    if let Some(url) = data_url {
        println!("Data mirror configured: {url}");
        config.data_url = Some(url);
    }
    if let Some(url) = textures_url {
        println!("Texture CDN configured: {url}");
        config.textures_url = Some(url);
    }
    if let Some(dir) = frontend {
        println!("Front-end directory configured: {}", dir.display());
        config.frontend_dir = Some(dir);
    }

    config.save()?;
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) -> Result<()> {
    println!("Data mirror:  {}", config.data_url());
    println!("Texture CDN:  {}", config.textures_url());
    match config.frontend_dir() {
        Some(dir) => println!("Front-end:    {}", dir.display()),
        None => println!("Front-end:    (not configured)"),
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file:  {}", path.display());
    }

    Ok(())
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: goodgen configure --frontend PATH_TO_FRONTEND_CHECKOUT");
    println!("   or: goodgen configure --data-url URL --textures-url URL");
    println!("   or: goodgen configure --show");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }

    #[test]
    fn test_show_config_with_defaults() {
        let result = show_config(&Config::default());
        assert!(result.is_ok());
    }
}
