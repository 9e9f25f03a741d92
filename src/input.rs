use egui::{Context, Pos2, Rect};

/// Pointer events in canvas-local logical coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Pos2 },
    PointerMove { position: Pos2 },
    PointerUp { position: Pos2 },
}

/// What the primary pointer did during one UI frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerFrame {
    /// Latest pointer position in screen coordinates
    pub pos: Option<Pos2>,
    pub pressed: bool,
    pub released: bool,
}

impl PointerFrame {
    pub fn from_context(ctx: &Context) -> Self {
        ctx.input(|i| Self {
            pos: i.pointer.latest_pos(),
            pressed: i.pointer.primary_pressed(),
            released: i.pointer.primary_released(),
        })
    }
}

/// Turns raw egui pointer state into canvas-local [`InputEvent`]s.
///
/// A gesture only starts when the button goes down inside the canvas. Once
/// started, moves and the final release are reported even if the pointer has
/// left the canvas, so every down is matched by an up.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    pressed_in_canvas: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read this frame's pointer state from egui
    pub fn collect(&mut self, ctx: &Context, canvas_rect: Rect) -> Vec<InputEvent> {
        self.process(PointerFrame::from_context(ctx), canvas_rect)
    }

    pub fn process(&mut self, frame: PointerFrame, canvas_rect: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let to_local = |p: Pos2| (p - canvas_rect.min).to_pos2();

        if frame.pressed {
            if let Some(pos) = frame.pos.filter(|p| canvas_rect.contains(*p)) {
                self.pressed_in_canvas = true;
                self.last_pointer_pos = Some(pos);
                events.push(InputEvent::PointerDown { position: to_local(pos) });
            }
        }

        if self.pressed_in_canvas {
            if let Some(pos) = frame.pos {
                if self.last_pointer_pos != Some(pos) {
                    self.last_pointer_pos = Some(pos);
                    events.push(InputEvent::PointerMove { position: to_local(pos) });
                }
            }

            if frame.released {
                self.pressed_in_canvas = false;
                if let Some(pos) = frame.pos.or(self.last_pointer_pos) {
                    events.push(InputEvent::PointerUp { position: to_local(pos) });
                }
            }
        }

        events
    }
}
