//! Configuration loading

use anyhow::Result;
use std::path::Path;

use crate::Config;

/// Load configuration from config file or environment variables
///
/// Config file search order:
/// 1. CHRISTMAS_CONFIG_PATH environment variable (explicit path)
/// 2. ./config.yaml (current working directory)
/// 3. /config/config.yaml (container mount path)
/// 4. Fall back to environment variables only
///
/// Runs before logging is up, so progress goes to stderr directly.
pub fn load_config() -> Result<Config> {
    let config_path = std::env::var("CHRISTMAS_CONFIG_PATH")
        .ok()
        .filter(|p| Path::new(p).exists())
        .or_else(|| first_existing(&["config.yaml", "/config/config.yaml"]));

    let config = if let Some(path) = config_path {
        eprintln!("Loading config from {path}");
        match Config::from_file(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load {path}: {e}");
                eprintln!("Falling back to environment variables");
                Config::from_env()?
            }
        }
    } else {
        Config::from_env()?
    };

    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s): {}",
            errors.len(),
            errors.join("; ")
        ));
    }

    Ok(config)
}

fn first_existing(candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find(|p| Path::new(p).exists())
        .map(|p| (*p).to_string())
}
