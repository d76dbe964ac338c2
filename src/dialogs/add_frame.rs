//! "Add Frame" dialog: asks for a texture path to append.

use eframe::egui;
use std::path::Path;

use crate::widgets::file_dialogs::pick_texture;

/// Path to store for a picked file: relative to the document directory when
/// inside it, forward slashes either way.
pub fn texture_ref(base_dir: &Path, picked: &Path) -> String {
    let rel = picked.strip_prefix(base_dir).unwrap_or(picked);
    rel.to_string_lossy().replace('\\', "/")
}

#[derive(Debug, Default)]
pub struct AddFrameDialog {
    open: bool,
    pub path: String,
    focus_pending: bool,
}

impl AddFrameDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.path.clear();
        self.focus_pending = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Render when open. Returns the entered path on confirm.
    pub fn render(&mut self, ctx: &egui::Context, base_dir: &Path) -> Option<String> {
        if !self.open {
            return None;
        }
        let mut confirmed = false;
        let mut cancelled = false;

        let response = egui::Modal::new(egui::Id::new("add_frame_modal")).show(ctx, |ui| {
            ui.set_width(420.0);
            ui.heading("Add Frame");
            ui.label("Texture path (relative to the document):");
            let edit = ui.add(
                egui::TextEdit::singleline(&mut self.path)
                    .hint_text("textures/anim/frame_01")
                    .desired_width(f32::INFINITY),
            );
            if self.focus_pending {
                edit.request_focus();
                self.focus_pending = false;
            }
            if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                confirmed = true;
            }
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Browse...").clicked()
                    && let Some(picked) = pick_texture(Some(base_dir))
                {
                    self.path = texture_ref(base_dir, &picked);
                }
                ui.separator();
                if ui.button("Add").clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

        if response.should_close() {
            cancelled = true;
        }
        if confirmed {
            self.open = false;
            return Some(self.path.trim().to_string());
        }
        if cancelled {
            self.open = false;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_ref_relative() {
        let base = Path::new("/work/anims");
        assert_eq!(
            texture_ref(base, Path::new("/work/anims/tex/eye_01.png")),
            "tex/eye_01.png"
        );
        assert_eq!(
            texture_ref(base, Path::new("/elsewhere/eye.png")),
            "/elsewhere/eye.png"
        );
    }

    #[test]
    fn test_open_resets_path() {
        let mut dialog = AddFrameDialog::new();
        dialog.path = "old".into();
        dialog.open();
        assert!(dialog.is_open());
        assert!(dialog.path.is_empty());
        dialog.close();
        assert!(!dialog.is_open());
    }
}
