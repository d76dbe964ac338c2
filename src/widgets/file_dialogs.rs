//! Shared file dialog helpers for widget UI.

use std::path::{Path, PathBuf};

pub const DOCUMENT_EXTS: &[&str] = &["yaml", "yml"];
pub const GIF_EXTS: &[&str] = &["gif"];

fn with_start_dir(dialog: rfd::FileDialog, start_dir: Option<&Path>) -> rfd::FileDialog {
    match start_dir {
        Some(dir) if dir.is_dir() => dialog.set_directory(dir),
        _ => dialog,
    }
}

/// Pick an animation document to open
pub fn pick_document(start_dir: Option<&Path>) -> Option<PathBuf> {
    with_start_dir(
        rfd::FileDialog::new()
            .add_filter("Animation YAML", DOCUMENT_EXTS)
            .add_filter("All Files", &["*"])
            .set_title("Open Animation"),
        start_dir,
    )
    .pick_file()
}

/// Choose where to save the document
pub fn save_document(start_dir: Option<&Path>, file_name: &str) -> Option<PathBuf> {
    with_start_dir(
        rfd::FileDialog::new()
            .add_filter("Animation YAML", DOCUMENT_EXTS)
            .set_title("Save Animation")
            .set_file_name(file_name),
        start_dir,
    )
    .save_file()
}

/// Choose the GIF output path
pub fn save_gif(start_dir: Option<&Path>, file_name: &str) -> Option<PathBuf> {
    with_start_dir(
        rfd::FileDialog::new()
            .add_filter("GIF Animation", GIF_EXTS)
            .set_title("Export GIF")
            .set_file_name(file_name),
        start_dir,
    )
    .save_file()
}

/// Pick a texture image to use as frame path
pub fn pick_texture(start_dir: Option<&Path>) -> Option<PathBuf> {
    with_start_dir(
        rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg"])
            .add_filter("All Files", &["*"])
            .set_title("Select Texture"),
        start_dir,
    )
    .pick_file()
}
