use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::app::SketchApp;
use crate::color::to_hex;
use crate::command::Command;
use crate::element::ShapeKind;
use crate::state::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE, ToolKind};

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            let tools = app.pad().tool_state().clone();
            let mut commands = Vec::new();

            ui.heading("Shapes");
            for kind in ShapeKind::ALL {
                if ui.radio(tools.active_shape == Some(kind), kind.name()).clicked() {
                    commands.push(Command::SelectShape(Some(kind)));
                }
            }
            let mut fill = tools.fill_enabled;
            if ui.checkbox(&mut fill, "Fill color").changed() {
                commands.push(Command::SetFill(fill));
            }

            ui.separator();
            ui.heading("Options");
            for tool in [ToolKind::Brush, ToolKind::Eraser] {
                let selected = tools.active_shape.is_none() && tools.active_tool == tool;
                if ui.radio(selected, tool.name()).clicked() {
                    commands.push(Command::SelectTool(tool));
                }
            }

            let mut size = tools.stroke_width();
            let slider = egui::Slider::new(&mut size, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE)
                .step_by(1.0)
                .text("Size");
            if ui.add(slider).changed() {
                commands.push(Command::SetStrokeWidth(size));
            }

            ui.horizontal(|ui| {
                if ui.button("Clear Canvas").clicked() {
                    commands.push(Command::ClearCanvas);
                }
                if ui.button("Save As Image").clicked() {
                    commands.push(Command::SaveImage(app.export_path().to_path_buf()));
                }
            });

            ui.separator();
            ui.heading("Colors");
            let mut color = tools.color;
            ui.horizontal(|ui| {
                if color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                    commands.push(Command::SetColor(color));
                }
                ui.monospace(to_hex(color));
            });

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }

            for command in commands {
                log::debug!("Palette command: {}", command.name());
                app.execute(command);
            }
        });
}
