//! Key binding reference shown in the help window (F1).

use eframe::egui;

/// Single help entry (key binding + description)
#[derive(Clone, Debug)]
pub struct HelpEntry {
    pub key: &'static str,
    pub desc: &'static str,
}

impl HelpEntry {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }
}

/// Global hotkeys
pub const GLOBAL_HELP: &[HelpEntry] = &[
    HelpEntry::new("F1", "Toggle help"),
    HelpEntry::new("Ctrl+N", "New animation"),
    HelpEntry::new("Ctrl+O", "Open animation"),
    HelpEntry::new("Ctrl+S", "Save"),
    HelpEntry::new("Ctrl+Shift+S", "Save as"),
    HelpEntry::new("Ctrl+E", "Export GIF"),
    HelpEntry::new("Ctrl+T", "Toggle text editor"),
];

pub const PLAYBACK_HELP: &[HelpEntry] = &[
    HelpEntry::new("Space", "Play/Pause"),
    HelpEntry::new("Esc", "Stop"),
];

pub const FRAMES_HELP: &[HelpEntry] = &[
    HelpEntry::new("Click", "Show frame"),
    HelpEntry::new("Drag ≡", "Reorder frame"),
    HelpEntry::new("✖", "Remove frame"),
];

pub const PREVIEW_HELP: &[HelpEntry] = &[
    HelpEntry::new("Ctrl+Wheel", "Zoom"),
    HelpEntry::new("1:1", "Reset zoom"),
];

pub fn all_help_sections() -> Vec<(&'static str, &'static [HelpEntry])> {
    vec![
        ("Global", GLOBAL_HELP),
        ("Playback", PLAYBACK_HELP),
        ("Frames", FRAMES_HELP),
        ("Preview", PREVIEW_HELP),
    ]
}

/// Render the help window while `open` is set
pub fn render_help_window(ctx: &egui::Context, open: &mut bool) {
    let key_color = egui::Color32::from_rgb(255, 200, 100);
    egui::Window::new("Help")
        .open(open)
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            for (title, entries) in all_help_sections() {
                ui.label(egui::RichText::new(title).strong());
                egui::Grid::new(("help_grid", title))
                    .num_columns(2)
                    .spacing([16.0, 2.0])
                    .show(ui, |ui| {
                        for entry in entries {
                            ui.label(egui::RichText::new(entry.key).monospace().color(key_color));
                            ui.label(entry.desc);
                            ui.end_row();
                        }
                    });
                ui.add_space(6.0);
            }
        });
}
