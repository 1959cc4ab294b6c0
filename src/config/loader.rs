use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::AppConfig;

const CONFIG_DIR: &str = "lazysettings";
const CONFIG_FILE: &str = "config.toml";

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Load the config from the default location, falling back to defaults.
pub fn load() -> color_eyre::Result<AppConfig> {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            debug!("No config directory found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

pub fn load_from(path: &Path) -> color_eyre::Result<AppConfig> {
    if !path.exists() {
        debug!("Config file not found at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    debug!("Loaded config from {:?}", path);
    Ok(config)
}

pub fn save_to(path: &Path, config: &AppConfig) -> color_eyre::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    debug!("Saved config to {:?}", path);
    Ok(())
}

/// Persist the selected theme to `path`, keeping the rest of the config file as is.
///
/// An unreadable config file is left untouched and its error returned.
pub fn save_theme(path: &Path, theme_name: &str) -> color_eyre::Result<()> {
    let mut config = load_from(path).inspect_err(|e| {
        warn!("Not saving theme, config at {:?} is unreadable: {}", path, e);
    })?;
    config.theme.name = theme_name.to_string();
    save_to(path, &config)
}
