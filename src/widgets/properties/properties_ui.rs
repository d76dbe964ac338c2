use eframe::egui;

use super::PropertiesForm;
use super::properties::{FRAME_COUNT_MAX, FRAME_COUNT_MIN};
use crate::core::document_events::SetPropertyEvent;
use crate::entities::document::Property;
use crate::widgets::WidgetActions;

/// Committed when the field loses focus holding a value that differs from the document
fn committed(response: &egui::Response, edited: bool) -> bool {
    response.lost_focus() && edited
}

/// Render the property form
pub fn render(ui: &mut egui::Ui, form: &mut PropertiesForm, enabled: bool) -> WidgetActions {
    let mut actions = WidgetActions::new();
    ui.heading("Properties");
    ui.separator();

    ui.add_enabled_ui(enabled, |ui| {
        egui::Grid::new("properties_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Name");
                let response = ui.text_edit_singleline(&mut form.name);
                if committed(&response, form.name_edited()) {
                    actions.send(SetPropertyEvent(Property::Name(form.name.clone())));
                }
                ui.end_row();

                ui.label("Path");
                let response = ui
                    .text_edit_singleline(&mut form.path)
                    .on_hover_text("Leave blank for none");
                if committed(&response, form.path_edited()) {
                    actions.send(SetPropertyEvent(Property::Path(form.path.clone())));
                }
                ui.end_row();

                ui.label("Loop");
                if ui.checkbox(&mut form.loop_enabled, "").changed() {
                    actions.send(SetPropertyEvent(Property::Loop(form.loop_enabled)));
                }
                ui.end_row();

                ui.label("Frame Count");
                let response = ui.add(
                    egui::DragValue::new(&mut form.frame_count)
                        .range(FRAME_COUNT_MIN..=FRAME_COUNT_MAX)
                        .speed(0.2),
                );
                if response.drag_stopped() || (response.changed() && !response.dragged()) {
                    actions.send(SetPropertyEvent(Property::FrameCount(form.frame_count)));
                }
                ui.end_row();

                ui.label("Constant");
                if ui
                    .checkbox(&mut form.is_constant, "")
                    .on_hover_text("IsConstant on the first texture pattern of every material")
                    .changed()
                {
                    actions.send(SetPropertyEvent(Property::IsConstant(form.is_constant)));
                }
                ui.end_row();
            });

        ui.add_space(6.0);
        egui::CollapsingHeader::new(format!("Materials ({})", form.materials.len()))
            .default_open(true)
            .show(ui, |ui| {
                if form.materials.is_empty() {
                    ui.weak("No materials");
                }
                for slot in 0..form.materials.len() {
                    ui.horizontal(|ui| {
                        ui.monospace(format!("#{}", form.materials[slot].index));
                        let response = ui.text_edit_singleline(&mut form.materials[slot].name);
                        if committed(&response, form.material_edited(slot)) {
                            let material = &form.materials[slot];
                            actions.send(SetPropertyEvent(Property::MaterialName {
                                index: material.index,
                                name: material.name.clone(),
                            }));
                        }
                    });
                }
            });
    });

    actions.hovered = ui.ui_contains_pointer();
    actions
}
