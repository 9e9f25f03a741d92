use crate::document::Document;
use crate::renderer;
use crate::surface::RasterSurface;

/// Repaint the surface from scratch: clear it, then paint every record in
/// insertion order with the parameters stored in the record.
///
/// This is a full O(n) pass; it runs on every preview frame of a shape drag.
pub fn replay(surface: &mut RasterSurface, history: &Document) {
    surface.clear();
    for record in history.all() {
        renderer::paint(surface, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ShapeKind, ShapeRecord, StrokeRecord};
    use crate::surface::BlendMode;
    use egui::{Color32, Pos2, Vec2};

    fn history() -> Document {
        let mut doc = Document::new();
        doc.append(ShapeRecord::new(
            ShapeKind::Rectangle,
            Pos2::new(2.0, 2.0),
            Vec2::new(20.0, 20.0),
            true,
            Color32::BLUE,
            3.0,
        ));
        doc.append(StrokeRecord::new(
            vec![Pos2::new(0.0, 10.0), Pos2::new(30.0, 10.0)],
            Color32::BLACK,
            4.0,
            BlendMode::DestinationOut,
        ));
        doc.append(ShapeRecord::new(
            ShapeKind::Triangle,
            Pos2::new(15.0, 5.0),
            Vec2::new(10.0, 20.0),
            false,
            Color32::RED,
            2.0,
        ));
        doc
    }

    #[test]
    fn test_replay_is_idempotent() {
        let doc = history();
        let mut surface = RasterSurface::new(32.0, 32.0, 2.0);
        replay(&mut surface, &doc);
        let first = surface.as_raw().to_vec();
        replay(&mut surface, &doc);
        assert_eq!(surface.as_raw(), &first[..]);
    }

    #[test]
    fn test_eraser_records_keep_erasing_on_replay() {
        let doc = history();
        let mut surface = RasterSurface::new(32.0, 32.0, 1.0);
        replay(&mut surface, &doc);
        // Inside the blue rectangle but under the eraser line
        assert_eq!(surface.pixel(5, 10), Some([0, 0, 0, 0]));
        // Inside the rectangle away from the eraser line
        assert_eq!(surface.pixel(5, 18), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_replay_of_empty_history_is_blank() {
        let mut surface = RasterSurface::new(16.0, 16.0, 2.0);
        replay(&mut surface, &history());
        assert!(!surface.is_blank());
        replay(&mut surface, &Document::new());
        assert_eq!(surface.as_raw(), RasterSurface::new(16.0, 16.0, 2.0).as_raw());
    }
}
