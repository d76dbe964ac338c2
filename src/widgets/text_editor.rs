//! Raw document text view.
//!
//! Mirrors the session's serialized document. Saving sends the buffer through
//! `SaveDocumentEvent`, which validates it before anything is written.

use eframe::egui;

use crate::core::document_events::{SaveDocumentEvent, ToggleTextEditorEvent};
use crate::widgets::WidgetActions;

#[derive(Debug, Default)]
pub struct TextEditorState {
    pub buffer: String,
    /// Text the buffer was last filled from
    synced_text: String,
    revision: Option<u64>,
}

impl TextEditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refill from the session when its revision moved
    pub fn sync(&mut self, text: &str, revision: u64) {
        if self.revision == Some(revision) {
            return;
        }
        self.buffer = text.to_string();
        self.synced_text = text.to_string();
        self.revision = Some(revision);
    }

    /// Buffer differs from the last synced text
    pub fn is_dirty(&self) -> bool {
        self.buffer != self.synced_text
    }

    /// Discard edits
    pub fn revert(&mut self) {
        self.buffer = self.synced_text.clone();
    }
}

/// Render the editor
pub fn render(ui: &mut egui::Ui, state: &mut TextEditorState) -> WidgetActions {
    let mut actions = WidgetActions::new();

    ui.horizontal(|ui| {
        ui.heading("Document");
        if state.is_dirty() {
            ui.label("(modified)");
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Close").on_hover_text("Ctrl+T").clicked() {
                actions.send(ToggleTextEditorEvent);
            }
            if ui
                .add_enabled(state.is_dirty(), egui::Button::new("Revert"))
                .clicked()
            {
                state.revert();
            }
            if ui.button("Save").on_hover_text("Ctrl+S").clicked() {
                actions.send(SaveDocumentEvent);
            }
        });
    });
    ui.separator();

    egui::ScrollArea::both()
        .id_salt("text_editor_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add(
                egui::TextEdit::multiline(&mut state.buffer)
                    .code_editor()
                    .desired_width(f32::INFINITY)
                    .desired_rows(30),
            );
        });

    actions.hovered = ui.ui_contains_pointer();
    actions
}
