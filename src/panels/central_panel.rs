use egui::{Color32, Rect, Sense, Stroke, pos2};

use crate::app::SketchApp;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let size = app.pad().surface().logical_size();
        let (response, painter) = ui.allocate_painter(size, Sense::drag());
        let canvas_rect = response.rect;

        for event in app.input.collect(ctx, canvas_rect) {
            app.pad.handle_input(&event);
        }

        let texture = app.canvas_texture(ctx);
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

        // Erased pixels are transparent; show them as paper
        painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);
        painter.image(texture, canvas_rect, uv, Color32::WHITE);
        painter.rect_stroke(canvas_rect, 0.0, Stroke::new(2.0, Color32::BLACK));
    });
}
