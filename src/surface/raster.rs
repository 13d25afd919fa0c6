//! Pixel canvas — a software rasterizer behind the `Surface` trait.
//!
//! Shapes are rasterized by point sampling: every pixel whose center falls
//! inside the shape takes the fill color. Pixel centers are mapped back into
//! the shape's local space through the inverse of the current transform, so
//! rotation and mirroring come for free.
//!
//! The canvas resolves to terminal cells with upper-half blocks: one cell
//! covers two vertically stacked pixels (foreground = top, background =
//! bottom).

use kurbo::{Affine, Circle, Ellipse, ParamCurveNearest, Point, Rect, RoundedRect, Shape};

use crate::types::{Cell, Rgb, Style};

use super::path::Path;
use super::Surface;

/// Canvas units per pixel edge unless configured otherwise.
pub const DEFAULT_UNIT: f64 = 4.0;

pub struct PixelCanvas {
    cols: usize,
    rows: usize,
    /// Canvas units covered by one pixel edge.
    unit: f64,
    clear_color: Rgb,
    pixels: Vec<Rgb>,
    transform: Affine,
    stack: Vec<Affine>,
}

impl PixelCanvas {
    /// A canvas `cols` x `rows` pixels, each `unit` canvas units square.
    pub fn new(cols: usize, rows: usize, unit: f64) -> Self {
        let unit = if unit.is_finite() && unit > 0.0 { unit } else { 1.0 };
        PixelCanvas {
            cols,
            rows,
            unit,
            clear_color: Rgb::BLACK,
            pixels: vec![Rgb::BLACK; cols * rows],
            transform: Affine::IDENTITY,
            stack: Vec::new(),
        }
    }

    /// A canvas covering a `width` x `height` terminal cell area.
    pub fn for_terminal(width: u16, height: u16, unit: f64) -> Self {
        Self::new(width as usize, height as usize * 2, unit)
    }

    pub fn pixel(&self, px: usize, py: usize) -> Option<Rgb> {
        (px < self.cols && py < self.rows).then(|| self.pixels[py * self.cols + px])
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Resolve pixel pairs into a terminal cell grid.
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        let height = self.rows.div_ceil(2);
        (0..height)
            .map(|cy| {
                (0..self.cols)
                    .map(|x| {
                        let top = self.pixels[2 * cy * self.cols + x];
                        let bottom = self.pixel(x, 2 * cy + 1).unwrap_or(self.clear_color);
                        Cell {
                            ch: '▀',
                            style: Style {
                                fg: Some(top),
                                bg: Some(bottom),
                            },
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Pixel-space bounds of the local-space box, padded by `pad` local units.
    fn device_bounds(&self, local: Rect, pad: f64) -> Option<PixelRange> {
        let device = self.transform.transform_rect_bbox(local.inflate(pad, pad));
        if !device.is_finite() {
            return None;
        }
        let to_px = |v: f64, limit: usize| (v / self.unit).floor().clamp(0.0, limit as f64) as usize;
        let range = PixelRange {
            x0: to_px(device.x0, self.cols),
            x1: to_px(device.x1 + self.unit, self.cols),
            y0: to_px(device.y0, self.rows),
            y1: to_px(device.y1 + self.unit, self.rows),
        };
        (range.x0 < range.x1 && range.y0 < range.y1).then_some(range)
    }

    /// Paint every pixel in `range` whose center, in local space, satisfies `inside`.
    fn fill_where(&mut self, range: PixelRange, color: Rgb, inside: impl Fn(Point) -> bool) {
        let det = self.transform.determinant();
        if !det.is_finite() || det.abs() < 1e-12 {
            return;
        }
        let inv = self.transform.inverse();
        for py in range.y0..range.y1 {
            for px in range.x0..range.x1 {
                let center = Point::new((px as f64 + 0.5) * self.unit, (py as f64 + 0.5) * self.unit);
                if inside(inv * center) {
                    self.pixels[py * self.cols + px] = color;
                }
            }
        }
    }

    fn fill_shape(&mut self, shape: &impl Shape, color: Rgb) {
        if let Some(range) = self.device_bounds(shape.bounding_box(), 0.0) {
            self.fill_where(range, color, |p| shape.contains(p));
        }
    }

    /// Geometric mean of the axis scale factors, ignoring reflection.
    fn linear_scale(&self) -> f64 {
        self.transform.determinant().abs().sqrt().max(1e-9)
    }

    /// Half stroke width in local units, never thinner than half a pixel.
    fn half_width(&self, line_width: f64) -> f64 {
        (line_width / 2.0).max(0.5 * self.unit / self.linear_scale())
    }
}

#[derive(Debug, Clone, Copy)]
struct PixelRange {
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
}

impl Surface for PixelCanvas {
    fn size(&self) -> (f64, f64) {
        (self.cols as f64 * self.unit, self.rows as f64 * self.unit)
    }

    fn clear(&mut self) {
        self.pixels.fill(self.clear_color);
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform * Affine::translate((dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
        self.transform = self.transform * Affine::rotate(angle);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform = self.transform * Affine::scale_non_uniform(sx, sy);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        self.fill_shape(&Rect::new(x, y, x + w, y + h).abs(), color);
    }

    fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Rgb) {
        let rect = Rect::new(x, y, x + w, y + h).abs();
        let r = radius.max(0.0).min(rect.width() / 2.0).min(rect.height() / 2.0);
        self.fill_shape(&RoundedRect::from_rect(rect, r), color);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb) {
        if r > 0.0 {
            self.fill_shape(&Circle::new((cx, cy), r), color);
        }
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, line_width: f64, color: Rgb) {
        let hw = self.half_width(line_width);
        let center = Point::new(cx, cy);
        let bounds = Circle::new(center, r.abs()).bounding_box();
        if let Some(range) = self.device_bounds(bounds, hw) {
            self.fill_where(range, color, |p| (p.distance(center) - r).abs() <= hw);
        }
    }

    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Rgb) {
        let (rx, ry) = (rx.abs(), ry.abs());
        if rx > 0.0 && ry > 0.0 {
            self.fill_shape(&Ellipse::new((cx, cy), (rx, ry), 0.0), color);
        }
    }

    fn fill_path(&mut self, path: &Path, color: Rgb) {
        if !path.is_empty() {
            self.fill_shape(&path.to_fill(), color);
        }
    }

    fn stroke_path(&mut self, path: &Path, line_width: f64, color: Rgb) {
        if path.is_empty() {
            return;
        }
        let hw = self.half_width(line_width);
        let segments = path.segments(0.25 * self.unit / self.linear_scale());
        if let Some(range) = self.device_bounds(path.bounding_box(), hw) {
            self.fill_where(range, color, |p| {
                segments
                    .iter()
                    .any(|seg| seg.nearest(p, 1e-9).distance_sq <= hw * hw)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb(255, 0, 0);
    const BLUE: Rgb = Rgb(0, 0, 255);

    #[test]
    fn fills_rect_in_canvas_units() {
        let mut c = PixelCanvas::new(10, 10, 4.0);
        assert_eq!(c.size(), (40.0, 40.0));
        c.fill_rect(8.0, 8.0, 8.0, 8.0, RED);
        assert_eq!(c.pixel(2, 2), Some(RED));
        assert_eq!(c.pixel(3, 3), Some(RED));
        assert_eq!(c.pixel(4, 4), Some(Rgb::BLACK));
        assert_eq!(c.pixel(1, 1), Some(Rgb::BLACK));
    }

    #[test]
    fn save_restore_scopes_transform() {
        let mut c = PixelCanvas::new(20, 20, 1.0);
        c.save();
        c.translate(10.0, 10.0);
        c.fill_rect(0.0, 0.0, 2.0, 2.0, RED);
        c.restore();
        c.fill_rect(0.0, 0.0, 2.0, 2.0, BLUE);
        assert_eq!(c.pixel(10, 10), Some(RED));
        assert_eq!(c.pixel(0, 0), Some(BLUE));
        // unbalanced restore is harmless
        c.restore();
        c.fill_rect(5.0, 5.0, 1.0, 1.0, BLUE);
        assert_eq!(c.pixel(5, 5), Some(BLUE));
    }

    #[test]
    fn flip_mirrors_around_origin() {
        let mut c = PixelCanvas::new(20, 4, 1.0);
        c.translate(10.0, 0.0);
        c.flip_horizontal();
        c.fill_rect(2.0, 0.0, 3.0, 2.0, RED);
        // local x in [2, 5] maps to device x in [5, 8]
        assert_eq!(c.pixel(6, 0), Some(RED));
        assert_eq!(c.pixel(12, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn transforms_compose_in_local_order() {
        let mut c = PixelCanvas::new(20, 20, 1.0);
        c.translate(10.0, 10.0);
        c.rotate(std::f64::consts::FRAC_PI_2);
        // local x in [0, 4] now runs down the device y axis
        c.fill_rect(0.0, 0.0, 4.0, 1.0, RED);
        assert_eq!(c.pixel(9, 12), Some(RED));
        assert_eq!(c.pixel(12, 10), Some(Rgb::BLACK));
    }

    #[test]
    fn degenerate_transform_draws_nothing() {
        let mut c = PixelCanvas::new(8, 8, 1.0);
        c.scale(0.0, 1.0);
        c.fill_rect(0.0, 0.0, 8.0, 8.0, RED);
        assert!((0..8).all(|x| (0..8).all(|y| c.pixel(x, y) == Some(Rgb::BLACK))));
    }

    #[test]
    fn curved_path_fills_inside_its_hull() {
        let mut c = PixelCanvas::new(20, 20, 1.0);
        let lens = Path::new()
            .move_to(0.0, 10.0)
            .quad_to(10.0, 0.0, 20.0, 10.0)
            .quad_to(10.0, 20.0, 0.0, 10.0);
        c.fill_path(&lens, BLUE);
        assert_eq!(c.pixel(10, 10), Some(BLUE));
        assert_eq!(c.pixel(1, 1), Some(Rgb::BLACK));
        assert_eq!(c.pixel(10, 1), Some(Rgb::BLACK));
    }

    #[test]
    fn circle_and_thin_stroke() {
        let mut c = PixelCanvas::new(21, 21, 1.0);
        c.fill_circle(10.5, 10.5, 5.0, RED);
        assert_eq!(c.pixel(10, 10), Some(RED));
        assert_eq!(c.pixel(10, 3), Some(Rgb::BLACK));

        let line = Path::new().move_to(0.0, 0.5).line_to(20.0, 0.5);
        c.stroke_path(&line, 0.1, BLUE);
        assert_eq!(c.pixel(15, 0), Some(BLUE));
        assert_eq!(c.pixel(15, 2), Some(Rgb::BLACK));
    }

    #[test]
    fn offscreen_shapes_are_clipped() {
        let mut c = PixelCanvas::new(8, 8, 1.0);
        c.fill_rect(-100.0, -100.0, 50.0, 50.0, RED);
        c.fill_circle(500.0, 3.0, 4.0, RED);
        assert!((0..8).all(|x| (0..8).all(|y| c.pixel(x, y) == Some(Rgb::BLACK))));
        c.fill_rect(-2.0, -2.0, 4.0, 4.0, RED);
        assert_eq!(c.pixel(0, 0), Some(RED));
    }

    #[test]
    fn cells_pack_two_pixels() {
        let mut c = PixelCanvas::for_terminal(3, 2, 1.0);
        assert_eq!(c.dimensions(), (3, 4));
        c.fill_rect(0.0, 0.0, 3.0, 1.0, RED);
        let cells = c.to_cells();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0][0].ch, '▀');
        assert_eq!(cells[0][0].style.fg, Some(RED));
        assert_eq!(cells[0][0].style.bg, Some(Rgb::BLACK));
        assert_eq!(cells[1][2].style.fg, Some(Rgb::BLACK));
    }
}
