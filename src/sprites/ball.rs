use crate::engine::instance::Instance;
use crate::surface::{Path, Surface};
use crate::types::Rgb;

use super::Sprite;

const LEATHER: Rgb = Rgb(0xfe, 0xf3, 0xc7);
const SEAM: Rgb = Rgb(0x11, 0x18, 0x27);

/// Rolls as a whole: the entire sprite turns with the rotation angle.
pub struct Ball;

impl Sprite for Ball {
    fn base_scale(&self) -> f64 {
        0.6
    }

    fn lift(&self) -> f64 {
        -10.0
    }

    fn draw(&self, inst: &Instance, s: f64, surface: &mut dyn Surface) {
        surface.rotate(inst.rotation_angle);
        surface.fill_circle(0.0, 0.0, 14.0 * s, LEATHER);
        let cross = Path::new()
            .move_to(-8.0 * s, -8.0 * s)
            .line_to(8.0 * s, 8.0 * s)
            .move_to(-8.0 * s, 8.0 * s)
            .line_to(8.0 * s, -8.0 * s);
        surface.stroke_path(&cross, 2.0 * s, SEAM);
    }
}

#[cfg(test)]
mod tests {
    use crate::sprites::render;
    use crate::sprites::tests::instance;
    use crate::surface::{Op, RecordingSurface};

    #[test]
    fn rotates_whole_sprite_before_drawing() {
        let mut inst = instance("ball");
        inst.rotation_angle = 0.8;
        let mut surface = RecordingSurface::new(800.0, 400.0);
        render(&inst, &mut surface);
        let rotate = surface.ops.iter().position(|op| *op == Op::Rotate(0.8));
        let first_shape = surface.ops.iter().position(|op| op.color().is_some());
        assert!(rotate.is_some());
        assert!(rotate < first_shape);
        assert_eq!(surface.shape_count(), 2);
    }
}
