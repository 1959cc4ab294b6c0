pub mod actions;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod paths;
pub mod resolver;

pub use actions::*;
use keybindings::KeybindingsConfig;
pub use loader::{config_path, load, save_theme};
pub use paths::{Paths, PathsConfig, home_dir};
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}
