use std::f64::consts::PI;

use crate::engine::instance::Instance;
use crate::surface::{Path, Surface};
use crate::types::Rgb;

use super::Sprite;

const FUR: Rgb = Rgb(0xd1, 0x9a, 0x66);
const EAR: Rgb = Rgb(0x8b, 0x5a, 0x2b);
const PAW: Rgb = Rgb(0x5a, 0x3d, 0x1e);
const INK: Rgb = Rgb(0x11, 0x18, 0x27);
const SKIN: Rgb = Rgb(0xfd, 0xe6, 0x8a);

/// Horizontal displacement of a limb's free end.
pub fn limb_swing(leg_phase: f64, phase_offset: f64, amplitude: f64) -> f64 {
    (leg_phase + phase_offset).sin() * amplitude
}

/// Dog legs as (hip x, phase offset). Diagonal pairs move together, and the
/// rear pair lags the front by one radian.
const DOG_LEGS: [(f64, f64); 4] = [(12.0, 0.0), (4.0, PI), (-8.0, 1.0), (-16.0, PI + 1.0)];

pub struct Dog;

impl Sprite for Dog {
    fn base_scale(&self) -> f64 {
        0.8
    }

    fn lift(&self) -> f64 {
        -6.0
    }

    fn draw(&self, inst: &Instance, s: f64, surface: &mut dyn Surface) {
        surface.fill_rect(-20.0 * s, -12.0 * s, 40.0 * s, 20.0 * s, FUR);
        surface.fill_circle(24.0 * s, -8.0 * s, 10.0 * s, FUR);
        surface.fill_rect(20.0 * s, -16.0 * s, 8.0 * s, 8.0 * s, EAR);

        let tail = Path::new()
            .move_to(-22.0 * s, -10.0 * s)
            .quad_to(-30.0 * s, -18.0 * s, -32.0 * s, -10.0 * s);
        surface.stroke_path(&tail, 4.0 * s, EAR);

        let hip_y = 8.0 * s;
        for (x, offset) in DOG_LEGS {
            let swing = limb_swing(inst.leg_phase, offset, 6.0 * s);
            let leg = Path::new()
                .move_to(x * s, hip_y)
                .line_to(x * s + swing, hip_y + 10.0 * s);
            surface.stroke_path(&leg, 4.0 * s, PAW);
        }
    }
}

/// Stick figure; the legs swing in antiphase.
pub struct Person;

impl Sprite for Person {
    fn base_scale(&self) -> f64 {
        0.7
    }

    fn lift(&self) -> f64 {
        -6.0
    }

    fn draw(&self, inst: &Instance, s: f64, surface: &mut dyn Surface) {
        let lw = 3.0 * s;
        let torso = Path::new().move_to(0.0, -18.0 * s).line_to(0.0, -4.0 * s);
        surface.stroke_path(&torso, lw, INK);
        surface.fill_circle(0.0, -26.0 * s, 6.0 * s, SKIN);

        let arms = Path::new()
            .move_to(0.0, -14.0 * s)
            .line_to(-8.0 * s, -6.0 * s)
            .move_to(0.0, -14.0 * s)
            .line_to(8.0 * s, -6.0 * s);
        surface.stroke_path(&arms, lw, INK);

        let mut legs = Path::new();
        for offset in [0.0, PI] {
            legs = legs
                .move_to(0.0, -4.0 * s)
                .line_to(limb_swing(inst.leg_phase, offset, 6.0 * s), 12.0 * s);
        }
        surface.stroke_path(&legs, lw, INK);
    }
}
