use egui::Pos2;

/// Collects pointer samples while a brush or eraser gesture is active.
///
/// Points are kept exactly as delivered: no decimation, and repeated points
/// are preserved.
#[derive(Debug, Default, Clone)]
pub struct StrokeRecorder {
    points: Option<Vec<Pos2>>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new sequence seeded with `point`, discarding any unfinished one
    pub fn begin(&mut self, point: Pos2) {
        self.points = Some(vec![point]);
    }

    /// Append a sample. Returns the previous point, which is where the new
    /// segment starts, or `None` if no stroke is being recorded.
    pub fn extend(&mut self, point: Pos2) -> Option<Pos2> {
        let points = self.points.as_mut()?;
        let previous = points.last().copied();
        points.push(point);
        previous
    }

    /// Hand over the completed sequence and reset the recorder
    pub fn finish(&mut self) -> Option<Vec<Pos2>> {
        self.points.take()
    }
}
