use crate::types::Rgb;

use super::path::Path;
use super::Surface;

/// A drawing call captured by `RecordingSurface`.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear,
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    FillRect { x: f64, y: f64, w: f64, h: f64, color: Rgb },
    FillRoundRect { x: f64, y: f64, w: f64, h: f64, radius: f64, color: Rgb },
    FillCircle { cx: f64, cy: f64, r: f64, color: Rgb },
    StrokeCircle { cx: f64, cy: f64, r: f64, line_width: f64, color: Rgb },
    FillEllipse { cx: f64, cy: f64, rx: f64, ry: f64, color: Rgb },
    FillPath { path: Path, color: Rgb },
    StrokePath { path: Path, line_width: f64, color: Rgb },
}

impl Op {
    pub fn color(&self) -> Option<Rgb> {
        match self {
            Op::FillRect { color, .. }
            | Op::FillRoundRect { color, .. }
            | Op::FillCircle { color, .. }
            | Op::StrokeCircle { color, .. }
            | Op::FillEllipse { color, .. }
            | Op::FillPath { color, .. }
            | Op::StrokePath { color, .. } => Some(*color),
            _ => None,
        }
    }
}

/// Surface that logs every call instead of drawing.
pub struct RecordingSurface {
    width: f64,
    height: f64,
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        RecordingSurface {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Number of shape calls (everything except transform and state ops).
    pub fn shape_count(&self) -> usize {
        self.ops.iter().filter(|op| op.color().is_some()).count()
    }

    pub fn take(&mut self) -> Vec<Op> {
        std::mem::take(&mut self.ops)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(Op::Translate(dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
        self.ops.push(Op::Rotate(angle));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.ops.push(Op::Scale(sx, sy));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        self.ops.push(Op::FillRect { x, y, w, h, color });
    }

    fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Rgb) {
        self.ops.push(Op::FillRoundRect { x, y, w, h, radius, color });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb) {
        self.ops.push(Op::FillCircle { cx, cy, r, color });
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, line_width: f64, color: Rgb) {
        self.ops.push(Op::StrokeCircle { cx, cy, r, line_width, color });
    }

    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Rgb) {
        self.ops.push(Op::FillEllipse { cx, cy, rx, ry, color });
    }

    fn fill_path(&mut self, path: &Path, color: Rgb) {
        self.ops.push(Op::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &Path, line_width: f64, color: Rgb) {
        self.ops.push(Op::StrokePath {
            path: path.clone(),
            line_width,
            color,
        });
    }
}
