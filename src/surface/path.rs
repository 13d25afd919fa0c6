use kurbo::{BezPath, Line, PathEl, Point, Rect, Shape};

/// A path built canvas-style on top of `kurbo::BezPath`. Drawing into a
/// path with no open subpath starts one, as a 2D canvas does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path(BezPath);

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.0.move_to((x, y));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        if !self.is_open() {
            return self.move_to(x, y);
        }
        self.0.line_to((x, y));
        self
    }

    /// Quadratic Bézier from the current point through control `(cx, cy)`.
    pub fn quad_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        if !self.is_open() {
            return self.move_to(x, y);
        }
        self.0.quad_to((cx, cy), (x, y));
        self
    }

    pub fn close(mut self) -> Self {
        if self.is_open() {
            self.0.close_path();
        }
        self
    }

    fn is_open(&self) -> bool {
        !matches!(self.0.elements().last(), None | Some(PathEl::ClosePath))
    }

    pub fn is_empty(&self) -> bool {
        self.0.elements().is_empty()
    }

    /// Every point the path names, curve control points included.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.0.elements().iter().flat_map(|el| {
            let pts = match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => [Some(p), None, None],
                PathEl::QuadTo(c, p) => [Some(c), Some(p), None],
                PathEl::CurveTo(a, b, p) => [Some(a), Some(b), Some(p)],
                PathEl::ClosePath => [None, None, None],
            };
            pts.into_iter().flatten().map(|p| (p.x, p.y))
        })
    }

    pub fn bounding_box(&self) -> Rect {
        self.0.bounding_box()
    }

    /// The path as a fill sees it: every open subpath closed.
    pub fn to_fill(&self) -> BezPath {
        let mut out = BezPath::new();
        let mut open = false;
        for &el in self.0.elements() {
            match el {
                PathEl::MoveTo(_) => {
                    if open {
                        out.close_path();
                    }
                    open = true;
                }
                PathEl::ClosePath => open = false,
                _ => {}
            }
            out.push(el);
        }
        if open {
            out.close_path();
        }
        out
    }

    /// Nonzero-winding containment of the filled path.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.to_fill().contains(Point::new(x, y))
    }

    /// Straight segments to stroke, curves flattened to within `tolerance`.
    /// Closed subpaths include the closing edge.
    pub fn segments(&self, tolerance: f64) -> Vec<Line> {
        let mut out = Vec::new();
        let mut start: Option<Point> = None;
        let mut last: Option<Point> = None;
        kurbo::flatten(self.0.iter(), tolerance, |el| match el {
            PathEl::MoveTo(p) => {
                start = Some(p);
                last = Some(p);
            }
            PathEl::LineTo(p) => {
                if let Some(a) = last.filter(|a| *a != p) {
                    out.push(Line::new(a, p));
                }
                last = Some(p);
            }
            PathEl::ClosePath => {
                if let (Some(a), Some(s)) = (last, start) {
                    if a != s {
                        out.push(Line::new(a, s));
                    }
                }
                last = start;
            }
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn square() -> Path {
        Path::new()
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .line_to(10.0, 10.0)
            .line_to(0.0, 10.0)
            .close()
    }

    #[test]
    fn polygon_containment() {
        let p = square();
        assert!(p.contains(5.0, 5.0));
        assert!(!p.contains(15.0, 5.0));
        assert!(!p.contains(-1.0, 5.0));
    }

    #[test]
    fn open_subpath_fills_as_if_closed() {
        let triangle = Path::new().move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(0.0, 10.0);
        assert!(triangle.contains(2.0, 2.0));
        assert!(!triangle.contains(8.0, 8.0));
    }

    #[test]
    fn closed_path_strokes_closing_edge() {
        assert_eq!(square().segments(0.1).len(), 4);
        let open = Path::new().move_to(0.0, 0.0).line_to(5.0, 0.0).line_to(5.0, 5.0);
        assert_eq!(open.segments(0.1).len(), 2);
    }

    #[test]
    fn line_after_close_starts_a_new_subpath() {
        let p = square().line_to(20.0, 20.0).line_to(30.0, 20.0);
        assert_eq!(p.segments(0.1).len(), 5);
        assert_eq!(p.points().nth(4), Some((20.0, 20.0)));
    }

    #[test]
    fn quad_flattens_toward_control() {
        let p = Path::new().move_to(0.0, 0.0).quad_to(5.0, 10.0, 10.0, 0.0);
        assert_eq!(p.points().collect::<Vec<_>>(), [(0.0, 0.0), (5.0, 10.0), (10.0, 0.0)]);

        let segments = p.segments(0.05);
        assert!(segments.len() > 2);
        let end = segments.last().unwrap().p1;
        assert_abs_diff_eq!(end.x, 10.0);
        assert_abs_diff_eq!(end.y, 0.0);
        // the apex of this curve sits at y = 5
        let apex = segments.iter().map(|l| l.p1.y).fold(f64::MIN, f64::max);
        assert!(apex > 4.5 && apex <= 5.0 + 1e-9);
    }
}
