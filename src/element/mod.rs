mod common;
mod shape;
mod stroke;

pub(crate) use common::{calculate_bounds, distance_to_line_segment};
pub use shape::{ShapeKind, ShapeRecord};
pub use stroke::StrokeRecord;

/// One committed entry of the drawing history.
///
/// Records are immutable once built and carry every parameter needed to paint
/// them again, so replay never consults the current tool state.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingRecord {
    Stroke(StrokeRecord),
    Shape(ShapeRecord),
}

impl DrawingRecord {
    pub fn kind_name(&self) -> &'static str {
        match self {
            DrawingRecord::Stroke(_) => "stroke",
            DrawingRecord::Shape(_) => "shape",
        }
    }

    pub fn as_stroke(&self) -> Option<&StrokeRecord> {
        match self {
            DrawingRecord::Stroke(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeRecord> {
        match self {
            DrawingRecord::Shape(s) => Some(s),
            _ => None,
        }
    }
}

impl From<StrokeRecord> for DrawingRecord {
    fn from(stroke: StrokeRecord) -> Self {
        DrawingRecord::Stroke(stroke)
    }
}

impl From<ShapeRecord> for DrawingRecord {
    fn from(shape: ShapeRecord) -> Self {
        DrawingRecord::Shape(shape)
    }
}
