//! Paints drawing primitives onto a [`RasterSurface`].
//!
//! Every primitive is reduced to a pixel-centre coverage test over the pixels
//! it can reach, so a record touches each pixel at most once and painting it
//! twice yields the same bytes. Polylines and outlines are marked one segment
//! at a time into a [`CoverageMask`], which keeps their cost proportional to
//! the painted area rather than to their bounding box.

use egui::{Color32, Pos2, Rect, Vec2};

use crate::element::{
    DrawingRecord, ShapeKind, ShapeRecord, StrokeRecord, calculate_bounds, distance_to_line_segment,
};
use crate::surface::{BlendMode, CoverageMask, RasterSurface};

/// Paint a committed record with the parameters stored in it
pub fn paint(surface: &mut RasterSurface, record: &DrawingRecord) {
    match record {
        DrawingRecord::Stroke(stroke) => paint_stroke(surface, stroke),
        DrawingRecord::Shape(shape) => paint_shape(surface, shape),
    }
}

/// Paint a freehand stroke as one polyline with round caps and joins
pub fn paint_stroke(surface: &mut RasterSurface, stroke: &StrokeRecord) {
    paint_polyline(surface, stroke.points(), stroke.color(), stroke.width(), stroke.blend());
}

/// Paint one new segment of a live brush stroke.
///
/// Used while the pointer is down so brush input never triggers a full replay.
pub fn paint_segment(
    surface: &mut RasterSurface,
    from: Pos2,
    to: Pos2,
    color: Color32,
    width: f32,
    blend: BlendMode,
) {
    paint_polyline(surface, &[from, to], color, width, blend);
}

/// Paint the single starting point of a live brush stroke
pub fn paint_dot(
    surface: &mut RasterSurface,
    at: Pos2,
    color: Color32,
    width: f32,
    blend: BlendMode,
) {
    paint_polyline(surface, &[at], color, width, blend);
}

fn paint_polyline(
    surface: &mut RasterSurface,
    points: &[Pos2],
    color: Color32,
    width: f32,
    blend: BlendMode,
) {
    let radius = width / 2.0;
    if points.is_empty() || radius <= 0.0 {
        return;
    }

    let mask = polyline_coverage(surface, points, radius);
    surface.composite_mask(&mask, color, blend);
}

/// Pixels within `radius` of a polyline. A single point covers a disc.
pub(crate) fn polyline_coverage(
    surface: &RasterSurface,
    points: &[Pos2],
    radius: f32,
) -> CoverageMask {
    let mut mask = CoverageMask::new(surface, calculate_bounds(points, radius));
    if let [point] = points {
        mark_capsule(&mut mask, *point, *point, radius);
    }
    for seg in points.windows(2) {
        mark_capsule(&mut mask, seg[0], seg[1], radius);
    }
    mask
}

fn mark_capsule(mask: &mut CoverageMask, a: Pos2, b: Pos2, radius: f32) {
    mask.mark(
        calculate_bounds(&[a, b], radius),
        |y| capsule_row_span(a, b, radius, y),
        |p| distance_to_line_segment(p, a, b) <= radius,
    );
}

/// Horizontal extent of the capsule of `radius` around `a`-`b` on the line at
/// height `y`, or `None` if the line misses it.
///
/// The capsule is convex, so this is the hull of what the two end discs and
/// the swept rectangle each contribute.
fn capsule_row_span(a: Pos2, b: Pos2, radius: f32, y: f32) -> Option<(f32, f32)> {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    let mut include = |x: f32| {
        lo = lo.min(x);
        hi = hi.max(x);
    };

    for cap in [a, b] {
        let dy = y - cap.y;
        if dy.abs() <= radius {
            let half = (radius * radius - dy * dy).sqrt();
            include(cap.x - half);
            include(cap.x + half);
        }
    }

    let dir = b - a;
    let len = dir.length();
    if len > 0.0 {
        let offset = Vec2::new(-dir.y, dir.x) * (radius / len);
        let quad = [a + offset, b + offset, b - offset, a - offset];
        for (i, &p) in quad.iter().enumerate() {
            let q = quad[(i + 1) % quad.len()];
            if (p.y - y) * (q.y - y) > 0.0 {
                continue;
            }
            if p.y == q.y {
                include(p.x);
                include(q.x);
            } else {
                include(p.x + (y - p.y) * (q.x - p.x) / (q.y - p.y));
            }
        }
    }

    (lo <= hi).then_some((lo, hi))
}

/// Paint a shape, filled or outlined, always composited over what is there
pub fn paint_shape(surface: &mut RasterSurface, shape: &ShapeRecord) {
    if shape.is_degenerate() {
        return;
    }

    let color = shape.color();
    let half_width = shape.stroke_width() / 2.0;
    let bounds = shape.bounds();
    let blend = BlendMode::SourceOver;

    match (shape.kind(), shape.filled()) {
        (ShapeKind::Rectangle, true) => {
            let rect = shape.rect_bounds();
            surface.fill_where(bounds, color, blend, |p| contains_half_open(rect, p));
        }
        (ShapeKind::Rectangle, false) => {
            paint_closed_outline(surface, &shape.rect_corners(), color, half_width);
        }
        (ShapeKind::Circle, filled) => {
            let center = shape.anchor();
            let radius = shape.circle_radius();
            if filled {
                surface.fill_where(bounds, color, blend, |p| (p - center).length() <= radius);
            } else if half_width > 0.0 {
                surface.fill_where(bounds, color, blend, |p| {
                    ((p - center).length() - radius).abs() <= half_width
                });
            }
        }
        (ShapeKind::Triangle, true) => {
            let [a, b, c] = shape.triangle_vertices();
            if edge(a, b, c) == 0.0 {
                return;
            }
            surface.fill_where(bounds, color, blend, |p| inside_triangle(p, a, b, c));
        }
        (ShapeKind::Triangle, false) => {
            paint_closed_outline(surface, &shape.triangle_vertices(), color, half_width);
        }
    }
}

fn paint_closed_outline(
    surface: &mut RasterSurface,
    vertices: &[Pos2],
    color: Color32,
    half_width: f32,
) {
    if half_width <= 0.0 {
        return;
    }
    let mut mask = CoverageMask::new(surface, calculate_bounds(vertices, half_width));
    for (i, &start) in vertices.iter().enumerate() {
        let end = vertices[(i + 1) % vertices.len()];
        mark_capsule(&mut mask, start, end, half_width);
    }
    surface.composite_mask(&mask, color, BlendMode::SourceOver);
}

fn contains_half_open(rect: Rect, p: Pos2) -> bool {
    rect.min.x <= p.x && p.x < rect.max.x && rect.min.y <= p.y && p.y < rect.max.y
}

/// Twice the signed area of the triangle (a, b, p)
fn edge(a: Pos2, b: Pos2, p: Pos2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

fn inside_triangle(p: Pos2, a: Pos2, b: Pos2, c: Pos2) -> bool {
    let (e0, e1, e2) = (edge(a, b, p), edge(b, c, p), edge(c, a, p));
    // Either winding, depending on the drag direction
    (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0) || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR: [u8; 4] = [0, 0, 0, 0];
    const RED: [u8; 4] = [255, 0, 0, 255];

    fn surface() -> RasterSurface {
        RasterSurface::new(40.0, 40.0, 1.0)
    }

    fn shape(kind: ShapeKind, anchor: Pos2, size: Vec2, filled: bool) -> ShapeRecord {
        ShapeRecord::new(kind, anchor, size, filled, Color32::RED, 2.0)
    }

    fn painted(kind: ShapeKind, anchor: Pos2, size: Vec2, filled: bool) -> RasterSurface {
        let mut s = surface();
        paint_shape(&mut s, &shape(kind, anchor, size, filled));
        s
    }

    /// Long zigzag across the whole default canvas
    fn zigzag(count: usize) -> Vec<Pos2> {
        (0..count)
            .map(|i| {
                let y = if i % 2 == 0 { 100.0 } else { 700.0 };
                Pos2::new(40.0 + 3.0 * i as f32, y)
            })
            .collect()
    }

    #[test]
    fn test_filled_circle_is_centred_on_anchor() {
        let s = painted(ShapeKind::Circle, Pos2::new(10.0, 10.0), Vec2::new(6.0, 8.0), true);

        assert_eq!(s.pixel(10, 10), Some(RED));
        // Left of the anchor is inside too, so the centre is not the drag midpoint
        assert_eq!(s.pixel(6, 10), Some(RED));
        assert_eq!(s.pixel(14, 10), Some(RED));
        assert_eq!(s.pixel(16, 10), Some(CLEAR));
        assert_eq!(s.pixel(10, 16), Some(CLEAR));
    }

    #[test]
    fn test_outlined_circle_leaves_centre_empty() {
        let s = painted(ShapeKind::Circle, Pos2::new(20.0, 20.0), Vec2::new(0.0, 20.0), false);
        assert_eq!(s.pixel(20, 20), Some(CLEAR));
        assert_eq!(s.pixel(29, 19), Some(RED));
    }

    #[test]
    fn test_negative_rectangle_extends_left_and_up() {
        let size = Vec2::new(-10.0, -5.0);
        let s = painted(ShapeKind::Rectangle, Pos2::new(20.0, 20.0), size, true);
        assert_eq!(s.pixel(10, 15), Some(RED));
        assert_eq!(s.pixel(19, 19), Some(RED));
        assert_eq!(s.pixel(20, 20), Some(CLEAR));
        assert_eq!(s.pixel(9, 15), Some(CLEAR));
    }

    #[test]
    fn test_outlined_rectangle_is_hollow() {
        let size = Vec2::new(20.0, 20.0);
        let s = painted(ShapeKind::Rectangle, Pos2::new(5.0, 5.0), size, false);
        assert_eq!(s.pixel(5, 15), Some(RED));
        assert_eq!(s.pixel(24, 15), Some(RED));
        assert_eq!(s.pixel(15, 5), Some(RED));
        assert_eq!(s.pixel(15, 15), Some(CLEAR));
    }

    #[test]
    fn test_triangle_fill_either_direction() {
        for height in [20.0, -20.0] {
            let size = Vec2::new(16.0, height);
            let s = painted(ShapeKind::Triangle, Pos2::new(20.0, 20.0), size, true);
            let base_y = if height > 0.0 { 38 } else { 1 };
            assert_eq!(s.pixel(20, base_y), Some(RED), "height {height}");
            assert_eq!(s.pixel(2, base_y), Some(CLEAR), "height {height}");
        }
    }

    #[test]
    fn test_outlined_triangle_traces_every_edge() {
        let size = Vec2::new(16.0, 20.0);
        let s = painted(ShapeKind::Triangle, Pos2::new(20.0, 10.0), size, false);
        // Apex, base midpoint and the middle of the left edge
        assert_eq!(s.pixel(20, 10), Some(RED));
        assert_eq!(s.pixel(20, 30), Some(RED));
        assert_eq!(s.pixel(16, 20), Some(RED));
        assert_eq!(s.pixel(20, 22), Some(CLEAR));
    }

    #[test]
    fn test_degenerate_shapes_paint_nothing() {
        for kind in ShapeKind::ALL {
            for filled in [true, false] {
                let s = painted(kind, Pos2::new(10.0, 10.0), Vec2::ZERO, filled);
                assert!(s.is_blank(), "{kind:?} filled={filled}");
            }
        }
    }

    #[test]
    fn test_single_point_stroke_paints_a_dot() {
        let mut s = surface();
        paint_dot(&mut s, Pos2::new(10.0, 10.0), Color32::RED, 6.0, BlendMode::SourceOver);
        assert_eq!(s.pixel(10, 10), Some(RED));
        assert_eq!(s.pixel(12, 10), Some(RED));
        assert_eq!(s.pixel(14, 10), Some(CLEAR));
    }

    #[test]
    fn test_segments_match_full_stroke() {
        let points = vec![Pos2::new(2.0, 2.0), Pos2::new(30.0, 5.0), Pos2::new(12.0, 35.0)];
        let (color, blend) = (Color32::RED, BlendMode::SourceOver);
        let stroke = StrokeRecord::new(points.clone(), color, 5.0, blend);

        let mut whole = surface();
        paint_stroke(&mut whole, &stroke);

        let mut incremental = surface();
        paint_dot(&mut incremental, points[0], color, 5.0, blend);
        for seg in points.windows(2) {
            paint_segment(&mut incremental, seg[0], seg[1], color, 5.0, blend);
        }

        assert_eq!(whole.as_raw(), incremental.as_raw());
    }

    #[test]
    fn test_stroke_coverage_matches_distance_test() {
        let points = [
            Pos2::new(3.0, 4.0),
            Pos2::new(33.5, 9.25),
            Pos2::new(33.5, 9.25),
            Pos2::new(8.0, 36.0),
            Pos2::new(37.0, 30.0),
            Pos2::new(20.0, 20.5),
        ];
        for (ratio, width) in [(1.0, 1.0), (1.5, 4.0), (2.0, 7.0)] {
            let radius = width / 2.0;
            let mut s = RasterSurface::new(40.0, 40.0, ratio);
            paint_polyline(&mut s, &points, Color32::RED, width, BlendMode::SourceOver);

            for py in 0..s.height() {
                for px in 0..s.width() {
                    let p = Pos2::new((px as f32 + 0.5) / ratio, (py as f32 + 0.5) / ratio);
                    let inside = points
                        .windows(2)
                        .any(|seg| distance_to_line_segment(p, seg[0], seg[1]) <= radius);
                    let expected = if inside { RED } else { CLEAR };
                    assert_eq!(s.pixel(px, py), Some(expected), "({px}, {py}) at {ratio}x");
                }
            }
        }
    }

    #[test]
    fn test_long_stroke_samples_scale_with_painted_area() {
        let s = RasterSurface::new(1280.0, 800.0, 2.0);
        let points = zigzag(400);
        let mask = polyline_coverage(&s, &points, 2.5);

        // The zigzag is dense enough to paint most of its bounding box; a
        // pixel is only sampled by the few segments that pass near it.
        assert!(mask.covered_count() > 2_000_000, "covered {}", mask.covered_count());
        assert!(
            mask.samples() < 4 * mask.covered_count(),
            "sampled {} for {} covered pixels",
            mask.samples(),
            mask.covered_count()
        );
    }

    #[test]
    fn test_diagonal_segment_samples_stay_near_the_line() {
        let s = RasterSurface::new(1280.0, 800.0, 2.0);
        let mask = polyline_coverage(&s, &[Pos2::new(0.0, 0.0), Pos2::new(1280.0, 800.0)], 1.0);

        // The bounding box holds millions of pixels; only a thin band is tested
        assert!(mask.covered_count() > 5_000);
        assert!(mask.samples() < 4 * mask.covered_count(), "sampled {}", mask.samples());
    }
}
