//! Playback transport bar: start/pause/stop, rate, loop, export.

use eframe::egui;

use crate::core::document_events::ExportGifDialogEvent;
use crate::core::player::{FPS_MAX, FPS_MIN, PlaybackState, Player};
use crate::core::player_events::*;
use crate::widgets::WidgetActions;

/// Render transport controls
pub fn render(ui: &mut egui::Ui, player: &Player, frame_count: usize) -> WidgetActions {
    let mut actions = WidgetActions::new();
    let has_frames = frame_count > 0;

    ui.horizontal(|ui| {
        let play_label = match player.state() {
            PlaybackState::Playing => "⏸ Pause",
            _ => "▶ Play",
        };
        if ui
            .add_enabled(has_frames, egui::Button::new(play_label))
            .on_hover_text("Space")
            .clicked()
        {
            actions.send(TogglePlayPauseEvent);
        }
        if ui
            .add_enabled(has_frames, egui::Button::new("⏮ Start"))
            .on_hover_text("Restart from frame 0")
            .clicked()
        {
            actions.send(StartEvent);
        }
        if ui
            .add_enabled(
                player.state() != PlaybackState::Stopped,
                egui::Button::new("⏹ Stop"),
            )
            .on_hover_text("Esc")
            .clicked()
        {
            actions.send(StopEvent);
        }

        ui.separator();

        let mut fps = player.fps();
        ui.label("FPS");
        if ui
            .add(egui::DragValue::new(&mut fps).range(FPS_MIN..=FPS_MAX).speed(0.25))
            .changed()
        {
            actions.send(SetFpsEvent(fps));
        }

        let mut loop_enabled = player.loop_enabled();
        if ui.checkbox(&mut loop_enabled, "Loop").changed() {
            actions.send(SetLoopEvent(loop_enabled));
        }

        ui.separator();

        if ui
            .add_enabled(has_frames, egui::Button::new("Export GIF..."))
            .on_hover_text("Ctrl+E")
            .clicked()
        {
            actions.send(ExportGifDialogEvent);
        }
    });

    actions.hovered = ui.ui_contains_pointer();
    actions
}
