//! Surface — the drawing abstraction sprites paint on.
//!
//! The API follows a 2D canvas: a current affine transform that can be
//! saved and restored, and a handful of filled/stroked primitives whose
//! coordinates are interpreted in the current transform's local space.
//! The pixel canvas keeps its geometry in `kurbo` types.

mod path;
mod raster;
mod recording;

pub use path::Path;
pub use raster::{PixelCanvas, DEFAULT_UNIT};
pub use recording::{Op, RecordingSurface};

use crate::types::Rgb;

pub trait Surface {
    /// Logical size in canvas units (width, height).
    fn size(&self) -> (f64, f64);

    /// Reset every pixel to the clear color. The transform stack is untouched.
    fn clear(&mut self);

    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, angle: f64);
    fn scale(&mut self, sx: f64, sy: f64);

    /// Mirror subsequent drawing around the local y axis.
    fn flip_horizontal(&mut self) {
        self.scale(-1.0, 1.0);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb);
    fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Rgb);
    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb);
    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, line_width: f64, color: Rgb);
    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Rgb);
    fn fill_path(&mut self, path: &Path, color: Rgb);
    fn stroke_path(&mut self, path: &Path, line_width: f64, color: Rgb);
}
