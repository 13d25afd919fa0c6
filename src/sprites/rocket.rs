use std::f64::consts::PI;

use crate::engine::instance::{Direction, Instance};
use crate::surface::{Path, Surface};
use crate::types::Rgb;

use super::Sprite;

const HULL: Rgb = Rgb(0xe1, 0x1d, 0x48);
const WINDOW: Rgb = Rgb(0xbf, 0xdb, 0xfe);
const FLAME: Rgb = Rgb(0xff, 0xa5, 0x00);

const FLAME_BASE: f64 = 12.0;
const FLAME_FLICKER: f64 = 6.0;

/// Flame length for a rotation phase, before scaling.
pub fn flame_length(rotation_angle: f64) -> f64 {
    FLAME_BASE + (rotation_angle * 3.0).sin() * FLAME_FLICKER
}

/// Drawn upright, nose to the top. Facing left is a half turn rather than
/// a mirror, so the flame then points up.
pub struct Rocket;

impl Sprite for Rocket {
    fn base_scale(&self) -> f64 {
        0.9
    }

    fn lift(&self) -> f64 {
        -30.0
    }

    fn orient(&self, direction: Direction, surface: &mut dyn Surface) {
        surface.rotate(if direction == Direction::Left { PI } else { 0.0 });
    }

    fn draw(&self, inst: &Instance, s: f64, surface: &mut dyn Surface) {
        let hull = Path::new()
            .move_to(0.0, -30.0 * s)
            .quad_to(20.0 * s, -10.0 * s, 0.0, 20.0 * s)
            .quad_to(-20.0 * s, -10.0 * s, 0.0, -30.0 * s);
        surface.fill_path(&hull, HULL);
        surface.fill_circle(0.0, -4.0 * s, 6.0 * s, WINDOW);

        let flame = flame_length(inst.rotation_angle) * s;
        let exhaust = Path::new()
            .move_to(-6.0 * s, 22.0 * s)
            .quad_to(0.0, 22.0 * s + flame, 6.0 * s, 22.0 * s)
            .close();
        surface.fill_path(&exhaust, FLAME);
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::sprites::render;
    use crate::sprites::tests::instance;
    use crate::surface::{Op, RecordingSurface};

    #[test]
    fn flame_flickers_around_base() {
        assert_abs_diff_eq!(flame_length(0.0), 12.0);
        assert_abs_diff_eq!(flame_length(FRAC_PI_2 / 3.0), 18.0, epsilon = 1e-12);
        for i in 0..100 {
            let len = flame_length(i as f64 * 0.37);
            assert!((6.0..=18.0).contains(&len));
        }
    }

    #[test]
    fn facing_flips_by_half_turn() {
        let mut inst = instance("rocket");
        let mut right = RecordingSurface::new(800.0, 400.0);
        render(&inst, &mut right);
        inst.direction = Direction::Left;
        let mut left = RecordingSurface::new(800.0, 400.0);
        render(&inst, &mut left);

        assert_eq!(right.ops[2], Op::Rotate(0.0));
        assert_eq!(left.ops[2], Op::Rotate(PI));
        assert!(!left.ops.contains(&Op::Scale(-1.0, 1.0)));
    }

    #[test]
    fn flame_tracks_rotation_angle() {
        let flame_tip = |angle: f64| {
            let mut inst = instance("rocket");
            inst.rotation_angle = angle;
            let mut surface = RecordingSurface::new(800.0, 400.0);
            render(&inst, &mut surface);
            let Some(Op::FillPath { path, .. }) = surface.ops.iter().rev().find(|op| matches!(op, Op::FillPath { .. })) else {
                panic!("no flame");
            };
            path.points().map(|(_, y)| y).fold(f64::MIN, f64::max)
        };
        assert!(flame_tip(FRAC_PI_2 / 3.0) > flame_tip(0.0));
    }
}
