use std::path::PathBuf;

use clap::Parser;

use crate::config::PathsConfig;
use crate::tabs::TabId;

#[derive(Parser, Debug)]
#[command(
    name = "lazysettings",
    version,
    about = "TUI for editing Hyprland keybinds and switching Waybar presets"
)]
pub struct Args {
    /// Hyprland keybind file to edit
    #[arg(long, value_name = "PATH")]
    pub keybinds: Option<PathBuf>,

    /// Directory holding the saved Waybar presets
    #[arg(long, value_name = "PATH")]
    pub presets_dir: Option<PathBuf>,

    /// Live Waybar config directory
    #[arg(long, value_name = "PATH")]
    pub waybar_dir: Option<PathBuf>,

    /// Script run after a preset is applied
    #[arg(long, value_name = "PATH")]
    pub reload_script: Option<PathBuf>,

    /// Tab to open on start
    #[arg(long, value_enum)]
    pub tab: Option<TabId>,
}

impl Args {
    /// Paths given on the command line, to be layered over the config file.
    pub fn path_overrides(&self) -> PathsConfig {
        PathsConfig {
            keybinds_file: self.keybinds.clone(),
            presets_dir: self.presets_dir.clone(),
            waybar_dir: self.waybar_dir.clone(),
            reload_script: self.reload_script.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lazysettings"]).unwrap();
        assert_eq!(args.path_overrides(), PathsConfig::default());
        assert_eq!(args.tab, None);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "lazysettings",
            "--keybinds",
            "/tmp/keybinds.conf",
            "--waybar-dir",
            "/tmp/waybar",
            "--tab",
            "presets",
        ])
        .unwrap();

        let overrides = args.path_overrides();
        assert_eq!(
            overrides.keybinds_file.as_deref(),
            Some(Path::new("/tmp/keybinds.conf"))
        );
        assert_eq!(overrides.waybar_dir.as_deref(), Some(Path::new("/tmp/waybar")));
        assert_eq!(overrides.presets_dir, None);
        assert_eq!(args.tab, Some(TabId::Presets));
    }

    #[test]
    fn test_unknown_tab_is_rejected() {
        assert!(Args::try_parse_from(["lazysettings", "--tab", "settings"]).is_err());
    }
}
