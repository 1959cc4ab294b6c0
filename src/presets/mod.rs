//! Waybar presets: named copies of the live Waybar config directory.

mod error;
pub mod fs;
mod reload;
mod store;

pub use error::PresetError;
pub use reload::{Reloader, ScriptReloader};
pub use store::{Applied, PresetStore};
