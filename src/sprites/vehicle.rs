use crate::engine::instance::Instance;
use crate::surface::{Path, Surface};
use crate::types::Rgb;

use super::Sprite;

const TIRE: Rgb = Rgb(0x11, 0x18, 0x27);
const RIM: Rgb = Rgb(0x9c, 0xa3, 0xaf);
const SEAT: Rgb = Rgb(0x33, 0x33, 0x33);
const HANDLEBAR: Rgb = Rgb(0x44, 0x44, 0x44);

/// Shared wheel: a dark disc with a rim and one spoke, spun by `angle`.
/// The spoke is what makes the rotation visible.
fn wheel(surface: &mut dyn Surface, cx: f64, cy: f64, r: f64, angle: f64) {
    surface.save();
    surface.translate(cx, cy);
    surface.rotate(angle);
    surface.fill_circle(0.0, 0.0, r, TIRE);
    surface.stroke_circle(0.0, 0.0, r, r * 0.2, RIM);
    let spoke = Path::new().move_to(0.0, 0.0).line_to(r, 0.0);
    surface.stroke_path(&spoke, r * 0.2, RIM);
    surface.restore();
}

pub struct Car;

impl Sprite for Car {
    fn draw(&self, inst: &Instance, s: f64, surface: &mut dyn Surface) {
        // body, then the darker cabin on top
        surface.fill_round_rect(-40.0 * s, -14.0 * s, 80.0 * s, 28.0 * s, 6.0 * s, inst.color);
        surface.fill_round_rect(
            -20.0 * s,
            -26.0 * s,
            40.0 * s,
            18.0 * s,
            4.0 * s,
            inst.color.shade(-10),
        );
        wheel(surface, -22.0 * s, 16.0 * s, 10.0 * s, inst.rotation_angle);
        wheel(surface, 22.0 * s, 16.0 * s, 10.0 * s, inst.rotation_angle);
    }
}

pub struct Motorcycle;

impl Sprite for Motorcycle {
    fn base_scale(&self) -> f64 {
        0.9
    }

    fn draw(&self, inst: &Instance, s: f64, surface: &mut dyn Surface) {
        wheel(surface, -26.0 * s, 14.0 * s, 10.0 * s, inst.rotation_angle);
        wheel(surface, 26.0 * s, 14.0 * s, 10.0 * s, inst.rotation_angle);

        let frame = Path::new().move_to(-20.0 * s, 10.0 * s).line_to(18.0 * s, 4.0 * s);
        surface.stroke_path(&frame, 4.0 * s, inst.color);

        surface.fill_rect(-5.0 * s, -6.0 * s, 18.0 * s, 8.0 * s, SEAT);
        // fuel tank
        surface.fill_ellipse(0.0, -4.0 * s, 14.0 * s, 8.0 * s, inst.color);

        let bar = Path::new().move_to(18.0 * s, 4.0 * s).line_to(28.0 * s, -6.0 * s);
        surface.stroke_path(&bar, 3.0 * s, HANDLEBAR);
    }
}

pub struct Bicycle;

impl Sprite for Bicycle {
    fn base_scale(&self) -> f64 {
        0.8
    }

    fn draw(&self, inst: &Instance, s: f64, surface: &mut dyn Surface) {
        wheel(surface, -30.0 * s, 12.0 * s, 12.0 * s, inst.rotation_angle);
        wheel(surface, 30.0 * s, 12.0 * s, 12.0 * s, inst.rotation_angle);

        let lw = 3.0 * s;
        // bottom tube, seat tube, top tube, back to the rear hub
        let frame = Path::new()
            .move_to(-30.0 * s, 12.0 * s)
            .line_to(5.0 * s, 12.0 * s)
            .line_to(0.0, -12.0 * s)
            .line_to(-10.0 * s, -12.0 * s)
            .line_to(-30.0 * s, 12.0 * s);
        surface.stroke_path(&frame, lw, inst.color);

        let fork = Path::new().move_to(5.0 * s, 12.0 * s).line_to(30.0 * s, 12.0 * s);
        surface.stroke_path(&fork, lw, inst.color);

        let handlebar = Path::new()
            .move_to(5.0 * s, 12.0 * s)
            .line_to(10.0 * s, -18.0 * s)
            .move_to(0.0, -18.0 * s)
            .line_to(20.0 * s, -18.0 * s);
        surface.stroke_path(&handlebar, lw, inst.color);

        let seat = Path::new().move_to(-5.0 * s, -12.0 * s).line_to(10.0 * s, -12.0 * s);
        surface.stroke_path(&seat, lw, inst.color);
    }
}
