use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const KEYBINDS_FILE: &str = ".config/hypr/config/software/keybinds.conf";
const PRESETS_DIR: &str = ".config/settings-app/waybar-presets";
const WAYBAR_DIR: &str = ".config/waybar";
const RELOAD_SCRIPT: &str = "Dots/Scripts/Waybar/waybar.sh";

/// Optional path overrides as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keybinds_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presets_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waybar_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reload_script: Option<PathBuf>,
}

impl PathsConfig {
    /// Overlay `other` on top of `self`; set fields in `other` win.
    #[must_use]
    pub fn merged(self, other: Self) -> Self {
        Self {
            keybinds_file: other.keybinds_file.or(self.keybinds_file),
            presets_dir: other.presets_dir.or(self.presets_dir),
            waybar_dir: other.waybar_dir.or(self.waybar_dir),
            reload_script: other.reload_script.or(self.reload_script),
        }
    }

    /// Fill unset paths with defaults under `home`.
    pub fn resolve(self, home: &std::path::Path) -> Paths {
        Paths {
            keybinds_file: self.keybinds_file.unwrap_or_else(|| home.join(KEYBINDS_FILE)),
            presets_dir: self.presets_dir.unwrap_or_else(|| home.join(PRESETS_DIR)),
            waybar_dir: self.waybar_dir.unwrap_or_else(|| home.join(WAYBAR_DIR)),
            reload_script: self.reload_script.unwrap_or_else(|| home.join(RELOAD_SCRIPT)),
        }
    }
}

/// Fully resolved locations the application works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub keybinds_file: PathBuf,
    pub presets_dir: PathBuf,
    pub waybar_dir: PathBuf,
    pub reload_script: PathBuf,
}

/// The user's home directory, `/root` if it cannot be determined.
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root"))
}
