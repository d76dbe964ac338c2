//! Persisted user settings (stored through eframe's storage as JSON).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::player::{FPS_DEFAULT, FPS_MAX, FPS_MIN, Player};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Playback rate
    pub fps: u32,
    pub loop_enabled: bool,
    pub show_text_editor: bool,
    /// Directory of the last opened or saved document
    pub last_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            fps: FPS_DEFAULT,
            loop_enabled: false,
            show_text_editor: false,
            last_dir: None,
        }
    }
}

impl AppSettings {
    /// Push playback settings into the player
    pub fn apply_to(&self, player: &mut Player) {
        player.set_fps(self.fps.clamp(FPS_MIN, FPS_MAX));
        player.set_loop_enabled(self.loop_enabled);
    }
}
