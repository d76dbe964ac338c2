//! Preview state: zoom and the texture cache.

use eframe::egui;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::textures::load_rgba;
use crate::error::Result;

pub const ZOOM_MIN: f32 = 0.1;
pub const ZOOM_MAX: f32 = 16.0;
const ZOOM_STEP: f32 = 1.25;

#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewState {
    pub zoom: f32,
    /// Uploaded textures keyed by resolved file path
    #[serde(skip)]
    textures: HashMap<PathBuf, egui::TextureHandle>,
    /// Texture currently on screen
    #[serde(skip)]
    shown: Option<PathBuf>,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            textures: HashMap::new(),
            shown: None,
        }
    }
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    pub fn shown_path(&self) -> Option<&Path> {
        self.shown.as_deref()
    }

    pub fn shown_texture(&self) -> Option<&egui::TextureHandle> {
        self.shown.as_ref().and_then(|p| self.textures.get(p))
    }

    /// Decode (or reuse) the texture at `path` and put it on screen.
    /// On failure whatever was shown before stays.
    pub fn show(&mut self, ctx: &egui::Context, path: &Path) -> Result<()> {
        if !self.textures.contains_key(path) {
            let rgba = load_rgba(path)?;
            let size = [rgba.width() as usize, rgba.height() as usize];
            let image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            let handle = ctx.load_texture(
                path.to_string_lossy(),
                image,
                egui::TextureOptions::NEAREST,
            );
            debug!("Uploaded texture {} ({}x{})", path.display(), size[0], size[1]);
            self.textures.insert(path.to_path_buf(), handle);
        }
        self.shown = Some(path.to_path_buf());
        Ok(())
    }

    /// Blank the preview (no frames)
    pub fn clear_shown(&mut self) {
        self.shown = None;
    }

    /// Drop all uploaded textures (document changed)
    pub fn clear_cache(&mut self) {
        self.textures.clear();
        self.shown = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamped() {
        let mut state = PreviewState::new();
        state.set_zoom(100.0);
        assert_eq!(state.zoom, ZOOM_MAX);
        state.set_zoom(0.0);
        assert_eq!(state.zoom, ZOOM_MIN);
        state.set_zoom(f32::NAN);
        assert_eq!(state.zoom, ZOOM_MIN);
    }

    #[test]
    fn test_zoom_steps() {
        let mut state = PreviewState::new();
        state.zoom_in();
        assert!((state.zoom - 1.25).abs() < 1e-6);
        state.zoom_out();
        state.zoom_out();
        assert!((state.zoom - 0.8).abs() < 1e-6);
        state.reset_zoom();
        assert_eq!(state.zoom, 1.0);
    }

    #[test]
    fn test_zoom_persists_without_cache() {
        let mut state = PreviewState::new();
        state.set_zoom(2.0);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"zoom":2.0}"#);
        let back: PreviewState = serde_json::from_str("{}").unwrap();
        assert_eq!(back.zoom, 1.0);
        assert!(back.shown_path().is_none());
    }
}
