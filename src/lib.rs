//! Terminal UI for editing a sectioned Hyprland keybind file and managing
//! named snapshots of the Waybar config directory.

pub mod app;
pub mod cli;
pub mod config;
pub mod keybinds;
pub mod presets;
pub mod search;
pub mod tabs;
pub mod theme;
pub mod tui;
pub mod ui;

pub use theme::Theme;
