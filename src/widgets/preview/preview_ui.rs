use eframe::egui::{self, Color32, Rect, Sense, pos2, vec2};

use super::PreviewState;

/// Checker square edge in points
pub const CHECKER_SIZE: f32 = 16.0;
pub const CHECKER_LIGHT: Color32 = Color32::WHITE;
pub const CHECKER_DARK: Color32 = Color32::from_rgb(0xCC, 0xCC, 0xCC);

/// Colour of checker cell (`col`, `row`)
pub fn checker_color(col: u32, row: u32) -> Color32 {
    if (col + row) % 2 == 0 {
        CHECKER_LIGHT
    } else {
        CHECKER_DARK
    }
}

fn paint_checker(painter: &egui::Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, CHECKER_LIGHT);
    let cols = (rect.width() / CHECKER_SIZE).ceil() as u32;
    let rows = (rect.height() / CHECKER_SIZE).ceil() as u32;
    for row in 0..rows {
        for col in 0..cols {
            let color = checker_color(col, row);
            if color == CHECKER_LIGHT {
                continue;
            }
            let min = rect.min + vec2(col as f32 * CHECKER_SIZE, row as f32 * CHECKER_SIZE);
            let cell = Rect::from_min_size(min, vec2(CHECKER_SIZE, CHECKER_SIZE)).intersect(rect);
            painter.rect_filled(cell, 0.0, color);
        }
    }
}

/// Render zoom toolbar and the preview canvas
pub fn render(ui: &mut egui::Ui, state: &mut PreviewState, caption: Option<&str>) {
    ui.horizontal(|ui| {
        if ui.button("−").on_hover_text("Zoom out").clicked() {
            state.zoom_out();
        }
        ui.monospace(format!("{:>6.1}%", state.zoom * 100.0));
        if ui.button("+").on_hover_text("Zoom in").clicked() {
            state.zoom_in();
        }
        if ui.button("1:1").clicked() {
            state.reset_zoom();
        }
        if let Some(caption) = caption {
            ui.separator();
            ui.label(caption);
        }
    });

    let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
    let painter = ui.painter_at(rect);
    paint_checker(&painter, rect);

    if response.hovered() {
        let zoom_delta = ui.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            state.set_zoom(state.zoom * zoom_delta);
        }
    }

    if let Some(texture) = state.shown_texture() {
        let size = texture.size_vec2() * state.zoom;
        let image_rect = Rect::from_center_size(rect.center(), size);
        painter.image(
            texture.id(),
            image_rect,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checker_alternates() {
        assert_eq!(checker_color(0, 0), CHECKER_LIGHT);
        assert_eq!(checker_color(1, 0), CHECKER_DARK);
        assert_eq!(checker_color(0, 1), CHECKER_DARK);
        assert_eq!(checker_color(3, 5), CHECKER_LIGHT);
    }
}
