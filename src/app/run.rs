//! Main application loop - eframe::App implementation.
//!
//! Contains the core update() method that runs each frame:
//! - Playback clock
//! - Event processing
//! - UI rendering (panels, dialogs)
//! - Input handling
//! - State persistence

use eframe::egui;
use log::trace;
use std::time::Instant;

use super::{EditorApp, window_title};
use crate::core::document_events::*;
use crate::core::player_events::ShowFrameEvent;
use crate::help;
use crate::widgets::frames::frames_ui::frame_label;
use crate::widgets::{self, WidgetActions};

impl EditorApp {
    fn dispatch(&self, actions: WidgetActions) {
        for event in actions.events {
            self.event_bus.emit_boxed(event);
        }
    }

    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        let has_document = self.session.has_document();
        let has_frames = self.session.frame_count() > 0;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui
                        .add(egui::Button::new("New").shortcut_text("Ctrl+N"))
                        .clicked()
                    {
                        self.event_bus.emit(NewDocumentEvent);
                        ui.close();
                    }
                    if ui
                        .add(egui::Button::new("Open...").shortcut_text("Ctrl+O"))
                        .clicked()
                    {
                        self.event_bus.emit(OpenDocumentDialogEvent);
                        ui.close();
                    }
                    ui.separator();
                    if ui
                        .add_enabled(
                            has_document,
                            egui::Button::new("Save").shortcut_text("Ctrl+S"),
                        )
                        .clicked()
                    {
                        self.event_bus.emit(SaveDocumentEvent);
                        ui.close();
                    }
                    if ui
                        .add_enabled(
                            has_document,
                            egui::Button::new("Save As...").shortcut_text("Ctrl+Shift+S"),
                        )
                        .clicked()
                    {
                        self.event_bus.emit(SaveDocumentAsEvent);
                        ui.close();
                    }
                    ui.separator();
                    if ui
                        .add_enabled(
                            has_frames,
                            egui::Button::new("Export GIF...").shortcut_text("Ctrl+E"),
                        )
                        .clicked()
                    {
                        self.event_bus.emit(ExportGifDialogEvent);
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    let mut show_text = self.settings.show_text_editor;
                    if ui
                        .checkbox(&mut show_text, "Text Editor (Ctrl+T)")
                        .changed()
                    {
                        self.event_bus.emit(ToggleTextEditorEvent);
                        ui.close();
                    }
                    if ui.button("Reset Zoom").clicked() {
                        self.preview.reset_zoom();
                        ui.close();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui
                        .add(egui::Button::new("Key Bindings").shortcut_text("F1"))
                        .clicked()
                    {
                        self.event_bus.emit(ToggleHelpEvent);
                        ui.close();
                    }
                });
            });
        });
    }

    /// Refresh form and text views after the session changed
    fn sync_views(&mut self) {
        let revision = self.session.revision();
        match self.session.document() {
            Some(doc) => self.properties.sync(doc, revision),
            None => self.properties.reset(),
        }
        self.text_editor.sync(self.session.text(), revision);
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = window_title(self.session.file());
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }
}

impl eframe::App for EditorApp {
    /// Main frame update - called every frame by eframe.
    ///
    /// Flow:
    /// 1. Advance playback (ticks become ShowFrameEvent)
    /// 2. Handle dropped files and process events
    /// 3. Sync views and window title
    /// 4. Render UI (menu, panels, dialogs)
    /// 5. Handle keyboard input
    /// 6. Schedule the next repaint while playing
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(tick) = self.player.update(Instant::now(), self.session.frame_count()) {
            trace!("Tick: {:?}", tick);
            self.event_bus.emit(ShowFrameEvent(tick.frame()));
        }

        self.handle_dropped_files(ctx);
        self.handle_events(ctx);
        self.sync_views();
        self.sync_title(ctx);

        self.render_menu_bar(ctx);

        egui::TopBottomPanel::top("transport_bar").show(ctx, |ui| {
            let actions = widgets::transport::render(ui, &self.player, self.session.frame_count());
            self.dispatch(actions);
        });

        self.status_bar.render(
            ctx,
            self.session.file(),
            self.shown_frame,
            self.session.frame_count(),
            &self.player,
            self.preview.zoom,
        );

        egui::SidePanel::left("frames_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                let actions = widgets::frames::render(
                    ui,
                    self.session.frames(),
                    self.session.unique_textures(),
                    self.shown_frame,
                    self.session.has_document(),
                );
                self.dispatch(actions);
            });

        egui::SidePanel::right("properties_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                let enabled = self.session.has_document();
                let actions = widgets::properties::render(ui, &mut self.properties, enabled);
                self.dispatch(actions);
            });

        if self.settings.show_text_editor {
            egui::SidePanel::right("text_editor_panel")
                .resizable(true)
                .default_width(420.0)
                .show(ctx, |ui| {
                    let actions = widgets::text_editor::render(ui, &mut self.text_editor);
                    self.dispatch(actions);
                });
        }

        let caption = self
            .shown_frame
            .and_then(|i| self.session.frames().get(i).map(|path| frame_label(i, path)));
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.has_document() {
                widgets::preview::render(ui, &mut self.preview, caption.as_deref());
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("Open an animation (Ctrl+O) or drop a .yaml file here");
                });
            }
        });

        if let Some(path) = self.add_frame_dialog.render(ctx, self.session.base_dir()) {
            self.event_bus.emit(AddFrameEvent(path));
        }
        help::render_help_window(ctx, &mut self.show_help);
        self.notices.render(ctx);

        self.handle_keyboard_input(ctx);

        if let Some(wait) = self.player.until_next_tick(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
        if self.event_bus.queue_len() > 0 {
            ctx.request_repaint();
        }
    }

    /// Save app state to persistent storage.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(json) = serde_json::to_string(self) {
            storage.set_string(eframe::APP_KEY, json);
        }
    }
}
