mod schema;

pub use schema::{Config, EventConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/hackrank/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("hackrank"))
}

/// Get the default config file path (~/.config/hackrank/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/hackrank/config.yaml)
///
/// Relative event paths are resolved against the directory holding the config file.
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path.or_else(get_config_path) {
        Some(p) => p,
        None => anyhow::bail!("Could not determine home directory; pass --config"),
    };

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Pass --dir-path, --event or --config",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let mut config = parse_config(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    if let Some(base) = config_path.parent() {
        resolve_event_paths(&mut config, base);
    }

    Ok(config)
}

/// Parse config YAML without touching the filesystem
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = serde_saphyr::from_str(content)?;
    Ok(config)
}

fn resolve_event_paths(config: &mut Config, base: &Path) {
    for event in &mut config.events {
        if event.path.is_relative() {
            event.path = base.join(&event.path);
        }
    }
}
