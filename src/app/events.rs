//! Event handling for EditorApp.
//!
//! Contains handlers for:
//! - Event bus events (handle_events)
//! - Keyboard input (handle_keyboard_input)
//! - Dropped files (handle_dropped_files)
//! - Native file dialogs requested by events

use eframe::egui;
use log::{debug, info, trace, warn};

use super::EditorApp;
use crate::core::document_events::{ExportGifEvent, OpenDocumentEvent, SaveDocumentToEvent};
use crate::core::player_events::StartEvent;
use crate::dialogs::Notice;
use crate::main_events;
use crate::widgets::file_dialogs::{self, DOCUMENT_EXTS};

impl EditorApp {
    /// Handle events from event bus.
    pub fn handle_events(&mut self, ctx: &egui::Context) {
        // Deferred actions to execute after event loop
        let mut deferred_open = false;
        let mut deferred_save = false;
        let mut deferred_export = false;
        let mut clear_preview = false;
        let mut display: Option<usize> = None;

        let events = self.event_bus.poll();
        for event in events {
            let Some(result) = main_events::handle_app_event(
                &event,
                &mut self.session,
                &mut self.player,
                &mut self.settings,
                &self.text_editor,
                &mut self.add_frame_dialog,
                &mut self.show_help,
            ) else {
                debug!("Unhandled event: {}", (*event).type_name());
                continue;
            };
            trace!("Handled event: {}", (*event).type_name());

            if result.clear_preview {
                clear_preview = true;
                display = None;
            }
            if result.display_frame.is_some() {
                display = result.display_frame;
            }
            if let Some(status) = result.status {
                self.status_bar.set_message(status);
            }
            for notice in result.notices {
                self.notices.push(notice);
            }
            deferred_open |= result.show_open_dialog;
            deferred_save |= result.show_save_dialog;
            deferred_export |= result.show_export_dialog;
        }

        if clear_preview {
            self.preview.clear_cache();
            self.shown_frame = None;
        }
        if let Some(index) = display {
            self.display_frame(ctx, index);
        }
        self.clamp_shown_frame();

        if self.autoplay_pending {
            self.autoplay_pending = false;
            if self.session.frame_count() > 0 {
                self.event_bus.emit(StartEvent);
            }
        }

        if deferred_open {
            self.show_open_dialog();
        }
        if deferred_save {
            self.show_save_dialog();
        }
        if deferred_export {
            self.show_export_dialog();
        }
    }

    /// Put frame `index` in the preview. A frame whose texture cannot be
    /// resolved or decoded raises a notice and the previous image stays.
    pub fn display_frame(&mut self, ctx: &egui::Context, index: usize) {
        let shown = self
            .session
            .resolve_frame(index)
            .and_then(|path| self.preview.show(ctx, &path));
        match shown {
            Ok(()) => self.shown_frame = Some(index),
            Err(e) => {
                warn!("Frame {}: {}", index, e);
                self.notify(Notice::from(&e));
            }
        }
    }

    /// Drop the preview when the shown frame no longer exists
    fn clamp_shown_frame(&mut self) {
        if self
            .shown_frame
            .is_some_and(|i| i >= self.session.frame_count())
        {
            self.shown_frame = None;
            self.preview.clear_shown();
        }
    }

    fn show_open_dialog(&mut self) {
        if let Some(path) = file_dialogs::pick_document(self.dialog_dir().as_deref()) {
            self.event_bus.emit(OpenDocumentEvent(path));
        }
    }

    fn show_save_dialog(&mut self) {
        let name = self
            .session
            .file()
            .and_then(|f| f.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "animation.yaml".to_string());
        if let Some(path) = file_dialogs::save_document(self.dialog_dir().as_deref(), &name) {
            self.event_bus.emit(SaveDocumentToEvent(path));
        }
    }

    fn show_export_dialog(&mut self) {
        let name = self
            .session
            .file()
            .and_then(|f| f.file_stem())
            .map(|s| format!("{}.gif", s.to_string_lossy()))
            .unwrap_or_else(|| "animation.gif".to_string());
        if let Some(path) = file_dialogs::save_gif(self.dialog_dir().as_deref(), &name) {
            self.event_bus.emit(ExportGifEvent(path));
        }
    }

    /// Route key presses through the hotkey table. Modal dialogs own the
    /// keyboard while they are up.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        if self.add_frame_dialog.is_open() || !self.notices.is_empty() {
            return;
        }
        let text_focus = ctx.wants_keyboard_input();
        if let Some(action) = ctx.input(|i| self.hotkeys.handle_input(i, text_focus)) {
            trace!("Hotkey: {:?}", action);
            self.event_bus.emit_boxed(action.to_event());
        }
    }

    /// Open the first dropped animation document
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .find(|p| {
                    p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| DOCUMENT_EXTS.contains(&e.to_lowercase().as_str()))
                })
        });
        if let Some(path) = dropped {
            info!("File dropped: {}", path.display());
            self.event_bus.emit(OpenDocumentEvent(path));
        }
    }
}
