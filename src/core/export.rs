//! Animated GIF export.
//!
//! Runs synchronously on the calling thread: every frame path is resolved
//! against the document directory, decoded, normalised to RGBA8 at the size of
//! the first frame, then encoded with the playback period as inter-frame delay.
//! The GIF is encoded in memory and written in one go; nothing is written
//! unless at least one frame resolved.

use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::{self, FilterType};
use image::{Delay, Frame, RgbaImage};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::textures::{load_rgba, resolve_texture};
use crate::error::{EditorError, Result};

/// Export parameters (taken from the transport controls)
#[derive(Clone, Debug)]
pub struct ExportSettings {
    pub output: PathBuf,
    /// Inter-frame delay in milliseconds
    pub delay_ms: u64,
    /// Loop forever; otherwise play once
    pub loop_forever: bool,
}

/// Outcome of a successful export
#[derive(Clone, Debug, PartialEq)]
pub struct ExportReport {
    pub output: PathBuf,
    pub frames_written: usize,
    /// Frame paths that did not resolve to a file
    pub skipped: Vec<String>,
}

/// Resolve and decode frames; unresolved paths are skipped, undecodable ones abort.
fn collect_images(base_dir: &Path, frames: &[String]) -> Result<(Vec<RgbaImage>, Vec<String>)> {
    let mut images = Vec::with_capacity(frames.len());
    let mut skipped = Vec::new();
    for frame in frames {
        match resolve_texture(base_dir, frame) {
            Some(path) => {
                let img = load_rgba(&path).map_err(|e| EditorError::Export(e.to_string()))?;
                images.push(img);
            }
            None => {
                warn!("Export: texture not found, skipping {}", frame);
                skipped.push(frame.clone());
            }
        }
    }
    Ok((images, skipped))
}

/// Resize every image to the first one's dimensions
fn normalize_sizes(images: Vec<RgbaImage>) -> Vec<RgbaImage> {
    let Some((w, h)) = images.first().map(|img| img.dimensions()) else {
        return images;
    };
    images
        .into_iter()
        .map(|img| {
            if img.dimensions() == (w, h) {
                img
            } else {
                imageops::resize(&img, w, h, FilterType::Nearest)
            }
        })
        .collect()
}

fn encode(images: Vec<RgbaImage>, settings: &ExportSettings) -> Result<Vec<u8>> {
    let export_err = |e: image::ImageError| EditorError::Export(e.to_string());
    let delay = Delay::from_numer_denom_ms(settings.delay_ms as u32, 1);

    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        if settings.loop_forever {
            encoder.set_repeat(Repeat::Infinite).map_err(export_err)?;
        }
        for img in images {
            encoder
                .encode_frame(Frame::from_parts(img, 0, 0, delay))
                .map_err(export_err)?;
        }
        // trailer is written on drop
    }
    Ok(buf)
}

/// Export `frames` as an animated GIF
pub fn export_gif(base_dir: &Path, frames: &[String], settings: &ExportSettings) -> Result<ExportReport> {
    let (images, skipped) = collect_images(base_dir, frames)?;
    if images.is_empty() {
        return Err(EditorError::Export("no valid frames found".into()));
    }
    let frames_written = images.len();
    let images = normalize_sizes(images);

    let bytes = encode(images, settings)?;
    if let Err(e) = fs::write(&settings.output, &bytes) {
        if settings.output.is_file() {
            let _ = fs::remove_file(&settings.output);
        }
        return Err(EditorError::Export(format!(
            "failed to write {}: {}",
            settings.output.display(),
            e
        )));
    }

    info!(
        "Exported {} frames to {} ({}ms, loop={})",
        frames_written,
        settings.output.display(),
        settings.delay_ms,
        settings.loop_forever
    );
    Ok(ExportReport {
        output: settings.output.clone(),
        frames_written,
        skipped,
    })
}
