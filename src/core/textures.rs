//! Texture path resolution and decoding.
//!
//! Frame paths are stored relative to the document's directory and usually
//! without an extension. Resolution tries the literal path first, then each
//! known image extension appended in order; the first existing file wins.

use image::RgbaImage;
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{EditorError, Result};

/// Suffixes tried in order ("" = literal path)
pub const TEXTURE_SUFFIXES: &[&str] = &["", ".png", ".jpg", ".jpeg"];

/// Resolve `frame` against `base_dir`
pub fn resolve_texture(base_dir: &Path, frame: &str) -> Option<PathBuf> {
    let base = base_dir.join(frame);
    TEXTURE_SUFFIXES.iter().find_map(|suffix| {
        let mut candidate: OsString = base.clone().into_os_string();
        candidate.push(suffix);
        let candidate = PathBuf::from(candidate);
        if candidate.is_file() {
            debug!("Resolved texture {} -> {}", frame, candidate.display());
            Some(candidate)
        } else {
            None
        }
    })
}

/// Resolve or report NotFound
pub fn require_texture(base_dir: &Path, frame: &str) -> Result<PathBuf> {
    resolve_texture(base_dir, frame)
        .ok_or_else(|| EditorError::NotFound(format!("texture not found: {}", frame)))
}

/// Decode an image file into RGBA8
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    debug!("Decoding texture: {}", path.display());
    let img = image::open(path).map_err(|e| EditorError::image(path, e))?;
    Ok(img.to_rgba8())
}
