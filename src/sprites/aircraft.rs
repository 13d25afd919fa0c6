use crate::engine::instance::Instance;
use crate::surface::{Path, Surface};
use crate::types::Rgb;

use super::Sprite;

const FUSELAGE: Rgb = Rgb(0x60, 0xa5, 0xfa);
const WING: Rgb = Rgb(0x1e, 0x3a, 0x8a);

/// Constant nose-up attitude, radians (negative is counter-clockwise on screen).
const CRUISE_TILT: f64 = -0.05;

/// Flies high above its lane with a fixed tilt. No animated parts.
pub struct Aircraft;

impl Sprite for Aircraft {
    fn base_scale(&self) -> f64 {
        1.1
    }

    fn lift(&self) -> f64 {
        -80.0
    }

    fn draw(&self, _inst: &Instance, s: f64, surface: &mut dyn Surface) {
        surface.rotate(CRUISE_TILT);

        surface.fill_round_rect(-40.0 * s, -10.0 * s, 80.0 * s, 20.0 * s, 10.0 * s, FUSELAGE);
        surface.fill_ellipse(40.0 * s, 0.0, 12.0 * s, 10.0 * s, FUSELAGE);

        for side in [-1.0, 1.0] {
            let wing = Path::new()
                .move_to(-10.0 * s, 0.0)
                .line_to(10.0 * s, 18.0 * s * side)
                .line_to(30.0 * s, 18.0 * s * side)
                .line_to(10.0 * s, 0.0)
                .close();
            surface.fill_path(&wing, WING);
        }

        let tail = Path::new()
            .move_to(-40.0 * s, -10.0 * s)
            .line_to(-54.0 * s, -20.0 * s)
            .line_to(-40.0 * s, -6.0 * s)
            .close();
        surface.fill_path(&tail, WING);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprites::render;
    use crate::sprites::tests::instance;
    use crate::surface::{Op, RecordingSurface};

    #[test]
    fn drawing_ignores_motion_state() {
        let draw = |angle: f64, phase: f64| {
            let mut inst = instance("airplane");
            inst.rotation_angle = angle;
            inst.leg_phase = phase;
            let mut surface = RecordingSurface::new(800.0, 400.0);
            render(&inst, &mut surface);
            surface.take()
        };
        assert_eq!(draw(0.0, 0.0), draw(3.0, 7.5));
    }

    #[test]
    fn tilt_is_fixed() {
        let mut surface = RecordingSurface::new(800.0, 400.0);
        render(&instance("airplane"), &mut surface);
        assert_eq!(surface.ops[2], Op::Rotate(CRUISE_TILT));
    }
}
