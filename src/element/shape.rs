use egui::{Color32, Pos2, Rect, Vec2};

/// The shapes offered by the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Triangle];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Triangle => "Triangle",
        }
    }
}

/// A committed shape, described by the raw drag that produced it.
///
/// `size` is the signed delta from the anchor to the release point. It is never
/// normalized: a negative width draws the rectangle to the left of the anchor,
/// and flips the triangle's base.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    kind: ShapeKind,
    anchor: Pos2,
    size: Vec2,
    filled: bool,
    color: Color32,
    stroke_width: f32,
}

impl ShapeRecord {
    pub fn new(
        kind: ShapeKind,
        anchor: Pos2,
        size: Vec2,
        filled: bool,
        color: Color32,
        stroke_width: f32,
    ) -> Self {
        Self {
            kind,
            anchor,
            size,
            filled,
            color,
            stroke_width,
        }
    }

    /// Build the record for a drag from `anchor` to `current`
    pub fn from_drag(
        kind: ShapeKind,
        anchor: Pos2,
        current: Pos2,
        filled: bool,
        color: Color32,
        stroke_width: f32,
    ) -> Self {
        Self::new(kind, anchor, current - anchor, filled, color, stroke_width)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn filled(&self) -> bool {
        self.filled
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// A zero-by-zero drag (a click without movement)
    pub fn is_degenerate(&self) -> bool {
        self.size.x == 0.0 && self.size.y == 0.0
    }

    /// Circles are centred on the anchor, with half the drag length as radius.
    pub fn circle_radius(&self) -> f32 {
        self.size.length() / 2.0
    }

    /// Apex at the anchor, base along `anchor.y + height`.
    pub fn triangle_vertices(&self) -> [Pos2; 3] {
        let Pos2 { x, y } = self.anchor;
        let Vec2 { x: w, y: h } = self.size;
        [
            Pos2::new(x, y),
            Pos2::new(x + w / 2.0, y + h),
            Pos2::new(x - w / 2.0, y + h),
        ]
    }

    /// The rectangle spanned by the drag, normalized so `min <= max`
    pub fn rect_bounds(&self) -> Rect {
        Rect::from_two_pos(self.anchor, self.anchor + self.size)
    }

    /// Corners of the rectangle in drag order, starting at the anchor
    pub fn rect_corners(&self) -> [Pos2; 4] {
        let a = self.anchor;
        let Vec2 { x: w, y: h } = self.size;
        [
            a,
            Pos2::new(a.x + w, a.y),
            Pos2::new(a.x + w, a.y + h),
            Pos2::new(a.x, a.y + h),
        ]
    }

    /// Area the shape can touch, including half the outline width
    pub fn bounds(&self) -> Rect {
        let outline = if self.filled { 0.0 } else { self.stroke_width / 2.0 };
        let rect = match self.kind {
            ShapeKind::Rectangle => self.rect_bounds(),
            ShapeKind::Circle => {
                Rect::from_center_size(self.anchor, Vec2::splat(self.circle_radius() * 2.0))
            }
            ShapeKind::Triangle => {
                let [a, b, c] = self.triangle_vertices();
                Rect::from_two_pos(a, b).union(Rect::from_two_pos(a, c))
            }
        };
        rect.expand(outline)
    }
}
