use eframe::egui;
use egui_dnd::dnd;
use indexmap::IndexSet;

use crate::core::document_events::{DeleteFrameEvent, ReorderFrameEvent, ShowAddFrameDialogEvent};
use crate::core::player_events::ShowFrameEvent;
use crate::widgets::WidgetActions;

/// Last path component, accepting either separator
pub fn frame_basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Button caption for frame `index`
pub fn frame_label(index: usize, path: &str) -> String {
    format!("Frame {}: {}", index, frame_basename(path))
}

/// Convert a drop position (insert-before index in the list as it was before
/// the drag) into the index the item ends up at.
pub fn drop_target(from: usize, to: usize) -> usize {
    if to > from { to - 1 } else { to }
}

/// Render the frame list panel
pub fn render(
    ui: &mut egui::Ui,
    frames: &[String],
    unique: &IndexSet<String>,
    shown: Option<usize>,
    enabled: bool,
) -> WidgetActions {
    let mut actions = WidgetActions::new();

    ui.horizontal(|ui| {
        ui.heading("Frames");
        ui.label(format!("({})", frames.len()));
    });
    ui.add_enabled_ui(enabled, |ui| {
        if ui.button("+ Add Frame").clicked() {
            actions.send(ShowAddFrameDialogEvent);
        }
    });
    ui.separator();

    let list_height = (ui.available_height() * 0.7).max(120.0);
    let mut order: Vec<usize> = (0..frames.len()).collect();
    let dnd_response = egui::ScrollArea::vertical()
        .id_salt("frame_list_scroll")
        .max_height(list_height)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            if frames.is_empty() {
                ui.weak("No frames");
            }
            dnd(ui, "frame_list").show_vec(&mut order, |ui, idx, handle, _state| {
                let i = *idx;
                let path = &frames[i];
                ui.horizontal(|ui| {
                    handle.ui(ui, |ui| {
                        ui.label("≡");
                    });
                    let response = ui
                        .selectable_label(shown == Some(i), frame_label(i, path))
                        .on_hover_text(path);
                    if response.clicked() {
                        actions.send(ShowFrameEvent(i));
                    }
                    if ui.small_button("✖").on_hover_text("Remove frame").clicked() {
                        actions.send(DeleteFrameEvent(i));
                    }
                });
            })
        })
        .inner;

    if let Some(update) = dnd_response.final_update() {
        let to = drop_target(update.from, update.to);
        if to != update.from {
            actions.send(ReorderFrameEvent { from: update.from, to });
        }
    }

    ui.separator();
    egui::CollapsingHeader::new(format!("Unique Textures ({})", unique.len()))
        .default_open(true)
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("unique_textures_scroll")
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for path in unique {
                        ui.monospace(path);
                    }
                });
        });

    actions.hovered = ui.ui_contains_pointer();
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_label() {
        assert_eq!(frame_label(0, "textures/eyes/blink_01"), "Frame 0: blink_01");
        assert_eq!(frame_label(12, "C:\\tex\\mouth.png"), "Frame 12: mouth.png");
        assert_eq!(frame_label(3, "plain"), "Frame 3: plain");
    }

    #[test]
    fn test_drop_target() {
        // Dragging down: insert-before index counts the dragged item itself
        assert_eq!(drop_target(0, 3), 2);
        assert_eq!(drop_target(1, 2), 1);
        // Dragging up
        assert_eq!(drop_target(3, 0), 0);
        assert_eq!(drop_target(2, 2), 2);
    }
}
