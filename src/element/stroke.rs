use egui::{Color32, Pos2};

use crate::surface::BlendMode;

/// A committed freehand stroke: an ordered polyline painted with round caps
/// and joins.
///
/// The blend mode is stored with the record so an eraser stroke keeps erasing
/// when history is replayed, whatever tool happens to be active at that time.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeRecord {
    points: Vec<Pos2>,
    color: Color32,
    width: f32,
    blend: BlendMode,
}

impl StrokeRecord {
    pub fn new(points: Vec<Pos2>, color: Color32, width: f32, blend: BlendMode) -> Self {
        debug_assert!(!points.is_empty(), "a stroke always has at least one point");
        Self {
            points,
            color,
            width,
            blend,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    pub fn is_eraser(&self) -> bool {
        self.blend == BlendMode::DestinationOut
    }
}
