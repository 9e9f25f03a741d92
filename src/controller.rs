use std::path::Path;

use egui::{Color32, Pos2};

use crate::color::{parse_hex_color, to_hex};
use crate::command::Command;
use crate::config::SketchConfig;
use crate::document::Document;
use crate::element::{ShapeKind, ShapeRecord, StrokeRecord};
use crate::error::SketchResult;
use crate::input::InputEvent;
use crate::redraw;
use crate::renderer;
use crate::state::{GestureState, ToolKind, ToolState};
use crate::stroke::StrokeRecorder;
use crate::surface::RasterSurface;

/// The drawing session: owns the surface, the history, the palette state and
/// the gesture in progress.
///
/// All mutation goes through this type. It can only be built around an
/// existing surface, so pointer handling can never run before the surface is
/// ready.
#[derive(Debug)]
pub struct Sketchpad {
    surface: RasterSurface,
    history: Document,
    tools: ToolState,
    gesture: GestureState,
    recorder: StrokeRecorder,
}

impl Sketchpad {
    pub fn new(surface: RasterSurface) -> Self {
        Self {
            surface,
            history: Document::new(),
            tools: ToolState::default(),
            gesture: GestureState::Idle,
            recorder: StrokeRecorder::new(),
        }
    }

    pub fn from_config(config: &SketchConfig) -> SketchResult<Self> {
        config.validate()?;
        let surface = RasterSurface::new(
            config.viewport_width,
            config.viewport_height,
            config.pixel_ratio,
        );
        let mut pad = Self::new(surface);
        pad.tools.color = config.default_color()?;
        pad.tools.set_stroke_width(config.default_brush_size);
        Ok(pad)
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn history(&self) -> &Document {
        &self.history
    }

    pub fn tool_state(&self) -> &ToolState {
        &self.tools
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    // --- pointer input -------------------------------------------------

    pub fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { position } => self.pointer_down(position),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp { position } => self.pointer_up(position),
        }
    }

    pub fn pointer_down(&mut self, position: Pos2) {
        if !self.gesture.is_idle() {
            log::debug!("Ignoring pointer down during {}", self.gesture.name());
            return;
        }

        match self.tools.active_shape {
            Some(kind) => {
                log::debug!("Starting {} at {:?}", kind.name(), position);
                self.gesture = GestureState::ShapePending {
                    kind,
                    anchor: position,
                    current: position,
                };
            }
            None => {
                log::debug!("Starting {} stroke at {:?}", self.tools.active_tool.name(), position);
                self.recorder.begin(position);
                renderer::paint_dot(
                    &mut self.surface,
                    position,
                    self.tools.color,
                    self.tools.stroke_width(),
                    self.tools.blend_mode(),
                );
                self.gesture = GestureState::StrokeActive;
            }
        }
    }

    pub fn pointer_move(&mut self, position: Pos2) {
        match self.gesture {
            GestureState::Idle => {}
            GestureState::StrokeActive => {
                if let Some(previous) = self.recorder.extend(position) {
                    renderer::paint_segment(
                        &mut self.surface,
                        previous,
                        position,
                        self.tools.color,
                        self.tools.stroke_width(),
                        self.tools.blend_mode(),
                    );
                }
            }
            GestureState::ShapePending { kind, anchor, .. } => {
                self.gesture = GestureState::ShapePending {
                    kind,
                    anchor,
                    current: position,
                };
                redraw::replay(&mut self.surface, &self.history);
                let preview = self.shape_from_drag(kind, anchor, position);
                renderer::paint_shape(&mut self.surface, &preview);
            }
        }
    }

    pub fn pointer_up(&mut self, position: Pos2) {
        match std::mem::take(&mut self.gesture) {
            GestureState::Idle => {}
            GestureState::StrokeActive => {
                if let Some(points) = self.recorder.finish() {
                    let stroke = StrokeRecord::new(
                        points,
                        self.tools.color,
                        self.tools.stroke_width(),
                        self.tools.blend_mode(),
                    );
                    log::debug!(
                        "Committed {} stroke with {} points",
                        if stroke.is_eraser() { "eraser" } else { "brush" },
                        stroke.points().len()
                    );
                    self.history.append(stroke);
                }
            }
            GestureState::ShapePending { kind, anchor, .. } => {
                let shape = self.shape_from_drag(kind, anchor, position);
                log::debug!("Committed {} with size {:?}", kind.name(), shape.size());
                self.history.append(shape);
                // Shapes are one-shot: the palette has to re-arm the next one
                self.tools.active_shape = None;
                redraw::replay(&mut self.surface, &self.history);
            }
        }
    }

    fn shape_from_drag(&self, kind: ShapeKind, anchor: Pos2, current: Pos2) -> ShapeRecord {
        ShapeRecord::from_drag(
            kind,
            anchor,
            current,
            self.tools.fill_enabled,
            self.tools.color,
            self.tools.stroke_width(),
        )
    }

    // --- palette -------------------------------------------------------

    /// Arm a shape for the next drag, or go back to freehand with `None`
    pub fn select_shape(&mut self, shape: Option<ShapeKind>) {
        log::debug!("Shape selected: {:?}", shape);
        self.tools.active_shape = shape;
    }

    /// Pick brush or eraser. This also disarms any selected shape.
    pub fn select_tool(&mut self, tool: ToolKind) {
        log::debug!("Tool selected: {}", tool.name());
        self.tools.active_tool = tool;
        self.tools.active_shape = None;
    }

    /// Set the brush color. Brush colors are opaque; any alpha is dropped.
    pub fn set_color(&mut self, color: Color32) {
        let [r, g, b, _] = color.to_srgba_unmultiplied();
        let color = Color32::from_rgb(r, g, b);
        log::debug!("Color set to {}", to_hex(color));
        self.tools.color = color;
    }

    /// Set the color from the picker's hex string
    pub fn set_color_hex(&mut self, hex: &str) -> SketchResult<()> {
        let color = parse_hex_color(hex)?;
        self.set_color(color);
        Ok(())
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.tools.set_stroke_width(width);
    }

    pub fn set_fill(&mut self, fill: bool) {
        self.tools.fill_enabled = fill;
    }

    pub fn toggle_fill(&mut self) {
        self.tools.fill_enabled = !self.tools.fill_enabled;
    }

    /// Forget all history and blank the surface
    pub fn clear(&mut self) {
        log::info!("Clearing canvas ({} records)", self.history.len());
        self.history.clear();
        self.surface.clear();
    }

    pub fn encode_png(&self) -> SketchResult<Vec<u8>> {
        self.surface.encode_png()
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> SketchResult<()> {
        self.surface.save_png(path)
    }

    /// Apply a palette command
    pub fn execute(&mut self, command: Command) -> SketchResult<()> {
        match command {
            Command::SelectShape(shape) => self.select_shape(shape),
            Command::SelectTool(tool) => self.select_tool(tool),
            Command::SetColor(color) => self.set_color(color),
            Command::SetStrokeWidth(width) => self.set_stroke_width(width),
            Command::SetFill(fill) => self.set_fill(fill),
            Command::ClearCanvas => self.clear(),
            Command::SaveImage(path) => self.save_png(path)?,
        }
        Ok(())
    }
}
