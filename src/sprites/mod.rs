//! Procedural sprites and their render dispatch.
//!
//! Each category lives in its own module with its sprite struct and
//! `Sprite` implementation side by side. All geometry is written in local
//! space around the instance position, facing right, and multiplied by the
//! sprite's scale factor.

mod aircraft;
mod ball;
mod rocket;
mod vehicle;
mod walker;

pub use aircraft::Aircraft;
pub use ball::Ball;
pub use rocket::Rocket;
pub use vehicle::{Bicycle, Car, Motorcycle};
pub use walker::{limb_swing, Dog, Person};

use crate::catalog::{Category, VehicleKind, WalkerKind};
use crate::engine::instance::{Direction, Instance};
use crate::surface::Surface;
use crate::types::Rgb;

const SKY: Rgb = Rgb(0xbf, 0xe9, 0xff);
const GRASS: Rgb = Rgb(0x9a, 0xe6, 0xb4);
/// Height of the ground band at the bottom of the canvas.
pub const GROUND_HEIGHT: f64 = 60.0;

/// Draw one kind of object. Implementations only read the instance.
pub trait Sprite {
    /// Multiplier applied on top of the instance's catalog scale.
    fn base_scale(&self) -> f64 {
        1.0
    }

    /// Vertical offset from the lane center, in canvas units.
    fn lift(&self) -> f64 {
        0.0
    }

    /// Orient the local frame for the facing direction. Mirrors by default.
    fn orient(&self, direction: Direction, surface: &mut dyn Surface) {
        if direction == Direction::Left {
            surface.flip_horizontal();
        }
    }

    /// Draw in local space. `s` is the combined scale factor.
    fn draw(&self, inst: &Instance, s: f64, surface: &mut dyn Surface);
}

pub fn sprite_for(category: Category) -> &'static dyn Sprite {
    match category {
        Category::Vehicle(VehicleKind::Car) => &Car,
        Category::Vehicle(VehicleKind::Motorcycle) => &Motorcycle,
        Category::Vehicle(VehicleKind::Bicycle) => &Bicycle,
        Category::Ball => &Ball,
        Category::Rocket => &Rocket,
        Category::Walker(WalkerKind::Dog) => &Dog,
        Category::Walker(WalkerKind::Person) => &Person,
        Category::Aircraft => &Aircraft,
    }
}

/// Draw `inst` at its current position. Leaves the surface transform as it
/// found it.
pub fn render(inst: &Instance, surface: &mut dyn Surface) {
    let sprite = sprite_for(inst.category);
    surface.save();
    surface.translate(inst.x, inst.y + sprite.lift());
    sprite.orient(inst.direction, surface);
    sprite.draw(inst, sprite.base_scale() * inst.scale, surface);
    surface.restore();
}

/// Sky over the whole canvas plus the ground band.
pub fn paint_background(surface: &mut dyn Surface) {
    let (w, h) = surface.size();
    surface.fill_rect(0.0, 0.0, w, h, SKY);
    surface.fill_rect(0.0, h - GROUND_HEIGHT, w, GROUND_HEIGHT, GRASS);
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::catalog::Catalog;
    use crate::engine::registry::Registry;
    use crate::surface::{Op, RecordingSurface};

    pub(super) fn instance(key: &str) -> Instance {
        let catalog = Catalog::default();
        let mut reg = Registry::seeded(11);
        let mut inst = reg.create(catalog.find(key).unwrap(), 800.0, 400.0).clone();
        inst.x = 300.0;
        inst.y = 200.0;
        inst
    }

    #[test]
    fn every_category_draws_and_balances_state() {
        for ty in Catalog::default().entries() {
            let inst = instance(&ty.key);
            let mut surface = RecordingSurface::new(800.0, 400.0);
            render(&inst, &mut surface);
            assert!(surface.shape_count() > 0, "{} drew nothing", ty.key);
            let saves = surface.ops.iter().filter(|op| **op == Op::Save).count();
            let restores = surface.ops.iter().filter(|op| **op == Op::Restore).count();
            assert_eq!(saves, restores, "{} leaks transform state", ty.key);
        }
    }

    #[test]
    fn render_does_not_mutate() {
        let inst = instance("dog");
        let before = inst.clone();
        render(&inst, &mut RecordingSurface::new(800.0, 400.0));
        assert_eq!(inst, before);
    }

    #[test]
    fn translates_to_lifted_position() {
        let inst = instance("airplane");
        let mut surface = RecordingSurface::new(800.0, 400.0);
        render(&inst, &mut surface);
        assert_eq!(surface.ops[1], Op::Translate(300.0, 120.0));
    }

    #[test]
    fn left_facing_sprites_are_mirrored() {
        for key in ["car", "motorcycle", "bicycle", "ball", "dog", "walker", "airplane"] {
            let mut inst = instance(key);
            inst.direction = Direction::Left;
            let mut surface = RecordingSurface::new(800.0, 400.0);
            render(&inst, &mut surface);
            assert_eq!(surface.ops[2], Op::Scale(-1.0, 1.0), "{key}");

            inst.direction = Direction::Right;
            let mut surface = RecordingSurface::new(800.0, 400.0);
            render(&inst, &mut surface);
            assert!(!surface.ops.contains(&Op::Scale(-1.0, 1.0)), "{key}");
        }
    }

    #[test]
    fn mirrored_draw_calls_match_unmirrored() {
        let mut inst = instance("car");
        let mut right = RecordingSurface::new(800.0, 400.0);
        render(&inst, &mut right);
        inst.direction = Direction::Left;
        let mut left = RecordingSurface::new(800.0, 400.0);
        render(&inst, &mut left);

        let shapes = |ops: &[Op]| -> Vec<Op> {
            ops.iter().filter(|op| op.color().is_some()).cloned().collect()
        };
        assert_eq!(shapes(&right.ops), shapes(&left.ops));
    }

    /// Every geometric number a shape or nested translate carries.
    fn geometry(op: &Op) -> Vec<f64> {
        match op {
            Op::Translate(x, y) => vec![*x, *y],
            Op::FillRect { x, y, w, h, .. } => vec![*x, *y, *w, *h],
            Op::FillRoundRect { x, y, w, h, radius, .. } => vec![*x, *y, *w, *h, *radius],
            Op::FillCircle { cx, cy, r, .. } => vec![*cx, *cy, *r],
            Op::StrokeCircle { cx, cy, r, line_width, .. } => vec![*cx, *cy, *r, *line_width],
            Op::FillEllipse { cx, cy, rx, ry, .. } => vec![*cx, *cy, *rx, *ry],
            Op::FillPath { path, .. } => path.points().flat_map(|(x, y)| [x, y]).collect(),
            Op::StrokePath { path, line_width, .. } => path
                .points()
                .flat_map(|(x, y)| [x, y])
                .chain([*line_width])
                .collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn every_dimension_follows_scale() {
        for ty in Catalog::default().entries() {
            let draw = |scale: f64| {
                let mut inst = instance(&ty.key);
                inst.scale = scale;
                inst.rotation_angle = 0.7;
                inst.leg_phase = 1.3;
                let mut surface = RecordingSurface::new(800.0, 400.0);
                render(&inst, &mut surface);
                // skip the save and the move to the lane position
                surface.ops[2..].iter().flat_map(geometry).collect::<Vec<f64>>()
            };
            let (one, two) = (draw(1.0), draw(2.0));
            assert!(one.iter().any(|v| *v != 0.0), "{} drew no geometry", ty.key);
            assert_eq!(one.len(), two.len(), "{}", ty.key);
            for (a, b) in one.iter().zip(&two) {
                assert_relative_eq!(2.0 * a, *b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn background_covers_canvas_and_ground() {
        let mut surface = RecordingSurface::new(640.0, 480.0);
        paint_background(&mut surface);
        assert_eq!(
            surface.ops,
            vec![
                Op::FillRect { x: 0.0, y: 0.0, w: 640.0, h: 480.0, color: SKY },
                Op::FillRect { x: 0.0, y: 420.0, w: 640.0, h: 60.0, color: GRASS },
            ]
        );
    }
}
