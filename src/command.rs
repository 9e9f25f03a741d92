use std::path::PathBuf;

use egui::Color32;

use crate::element::ShapeKind;
use crate::state::ToolKind;

/// Actions issued by the tool palette
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Arm a shape for the next drag; `None` returns to freehand drawing
    SelectShape(Option<ShapeKind>),
    SelectTool(ToolKind),
    SetColor(Color32),
    SetStrokeWidth(f32),
    SetFill(bool),
    /// Empty the history and blank the surface
    ClearCanvas,
    /// Export the surface as PNG to the given path
    SaveImage(PathBuf),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SelectShape(_) => "SelectShape",
            Command::SelectTool(_) => "SelectTool",
            Command::SetColor(_) => "SetColor",
            Command::SetStrokeWidth(_) => "SetStrokeWidth",
            Command::SetFill(_) => "SetFill",
            Command::ClearCanvas => "ClearCanvas",
            Command::SaveImage(_) => "SaveImage",
        }
    }
}
