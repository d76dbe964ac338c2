use eframe::egui;
use std::path::Path;

use crate::core::player::{PlaybackState, Player};

/// Status bar component
#[derive(Debug, Default)]
pub struct StatusBar {
    pub current_message: String,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.current_message = message.into();
    }

    /// Render status bar at bottom of screen
    pub fn render(
        &self,
        ctx: &egui::Context,
        file: Option<&Path>,
        shown: Option<usize>,
        frame_count: usize,
        player: &Player,
        zoom: f32,
    ) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match file.and_then(|p| p.file_name()).and_then(|n| n.to_str()) {
                    Some(name) => ui.monospace(name),
                    None => ui.monospace("No file"),
                };

                ui.separator();
                ui.monospace(frame_position(shown, frame_count));

                ui.separator();
                ui.monospace(Self::format_state(player.state()));

                ui.separator();
                ui.monospace(format!("{} fps ({} ms)", player.fps(), player.period_ms()));
                if player.loop_enabled() {
                    ui.monospace("loop");
                }

                ui.separator();
                ui.monospace(format!("{:>6.1}%", zoom * 100.0));

                if !self.current_message.is_empty() {
                    ui.separator();
                    ui.monospace(&self.current_message);
                }
            });
        });
    }

    fn format_state(state: PlaybackState) -> &'static str {
        match state {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }
}

/// `current/total` (1-based), or `-/total` when nothing is shown
fn frame_position(shown: Option<usize>, frame_count: usize) -> String {
    match shown {
        Some(i) if i < frame_count => format!("{:>4}/{:<4}", i + 1, frame_count),
        _ => format!("{:>4}/{:<4}", "-", frame_count),
    }
}
