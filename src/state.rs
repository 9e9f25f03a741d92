use egui::{Color32, Pos2};

use crate::element::ShapeKind;
use crate::surface::BlendMode;

/// Smallest brush size the palette offers
pub const MIN_BRUSH_SIZE: f32 = 1.0;
/// Largest brush size the palette offers
pub const MAX_BRUSH_SIZE: f32 = 20.0;

/// Freehand tools; mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Eraser => "Eraser",
        }
    }

    /// How this tool composites onto the surface
    pub fn blend_mode(&self) -> BlendMode {
        match self {
            ToolKind::Brush => BlendMode::SourceOver,
            ToolKind::Eraser => BlendMode::DestinationOut,
        }
    }
}

/// Palette selections. Changing them never touches committed records.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    pub active_tool: ToolKind,
    /// A selected shape takes precedence over the freehand tool for the next
    /// gesture, and is cleared once that shape is committed.
    pub active_shape: Option<ShapeKind>,
    pub color: Color32,
    stroke_width: f32,
    pub fill_enabled: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            active_tool: ToolKind::Brush,
            active_shape: None,
            color: Color32::BLACK,
            stroke_width: 5.0,
            fill_enabled: false,
        }
    }
}

impl ToolState {
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Set the brush size, clamped to the palette's range
    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = if width.is_nan() {
            MIN_BRUSH_SIZE
        } else {
            width.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
        };
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.active_tool.blend_mode()
    }
}

/// The pointer gesture in progress, if any. Only one can be active.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Brush or eraser: points are being collected by the stroke recorder
    StrokeActive,
    /// Shape drag: anchor captured at pointer-down, `current` follows the pointer
    ShapePending {
        kind: ShapeKind,
        anchor: Pos2,
        current: Pos2,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "Idle",
            GestureState::StrokeActive => "StrokeActive",
            GestureState::ShapePending { .. } => "ShapePending",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_width_is_clamped() {
        let mut tools = ToolState::default();
        assert_eq!(tools.stroke_width(), 5.0);
        tools.set_stroke_width(0.0);
        assert_eq!(tools.stroke_width(), MIN_BRUSH_SIZE);
        tools.set_stroke_width(50.0);
        assert_eq!(tools.stroke_width(), MAX_BRUSH_SIZE);
        tools.set_stroke_width(f32::NAN);
        assert_eq!(tools.stroke_width(), MIN_BRUSH_SIZE);
    }

    #[test]
    fn test_eraser_blend_mode() {
        let mut tools = ToolState::default();
        assert_eq!(tools.blend_mode(), BlendMode::SourceOver);
        tools.active_tool = ToolKind::Eraser;
        assert_eq!(tools.blend_mode(), BlendMode::DestinationOut);
    }
}
