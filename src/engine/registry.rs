//! Instance registry — owns the live instances and their lifecycle.

use std::f64::consts::TAU;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::ObjectType;

use super::instance::{palette_color, Direction, Field, Instance, InstanceId};

pub struct Registry {
    instances: Vec<Instance>,
    next_id: u32,
    rng: StdRng,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Registry {
    /// A registry whose random placement is reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Registry {
            instances: Vec::new(),
            next_id: 1,
            rng,
        }
    }

    /// Create an instance of `ty` on a `width` x `height` canvas and return it.
    ///
    /// The new instance starts at mid-canvas with a random x in the first
    /// fifth of the width and a random gait phase.
    pub fn create(&mut self, ty: &ObjectType, width: f64, height: f64) -> &Instance {
        let id = InstanceId(self.next_id);
        self.next_id += 1;

        let spread = (width * 0.2).max(0.0);
        let x = if spread > 0.0 {
            self.rng.gen_range(0.0..spread) + 20.0
        } else {
            20.0
        };

        let inst = Instance {
            id,
            key: ty.key.clone(),
            label: ty.label.clone(),
            icon: ty.icon.clone(),
            category: ty.category,
            mass: ty.default_mass,
            velocity: ty.starting_velocity(),
            direction: Direction::Right,
            x,
            y: height * 0.5,
            rotation_angle: 0.0,
            leg_phase: self.rng.gen_range(0.0..TAU),
            color: palette_color(id),
            scale: ty.scale,
        };
        debug!("created {} {} ({})", inst.key, id, inst.category.name());

        self.instances.push(inst);
        &self.instances[self.instances.len() - 1]
    }

    /// Remove the instance with `id`. Returns whether anything was removed;
    /// an absent id is a no-op.
    pub fn remove(&mut self, id: InstanceId) -> bool {
        let before = self.instances.len();
        self.instances.retain(|i| i.id != id);
        let removed = self.instances.len() != before;
        if removed {
            debug!("removed {id}");
        }
        removed
    }

    /// Drop every instance. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Instances in creation order.
    pub fn list(&self) -> &[Instance] {
        &self.instances
    }

    pub fn list_mut(&mut self) -> &mut [Instance] {
        &mut self.instances
    }

    pub fn get(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Live edit of mass or velocity. Non-finite values are stored as 0.
    /// Unknown ids are ignored.
    pub fn update_field(&mut self, id: InstanceId, field: Field, value: f64) {
        let value = if value.is_finite() {
            value
        } else {
            warn!("non-finite {field:?} for {id} coerced to 0");
            0.0
        };
        if let Some(inst) = self.instances.iter_mut().find(|i| i.id == id) {
            match field {
                Field::Mass => inst.mass = value,
                Field::Velocity => inst.velocity = value,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn registry_with(keys: &[&str]) -> Registry {
        let catalog = Catalog::default();
        let mut reg = Registry::seeded(7);
        for key in keys {
            let ty = catalog.find(key).unwrap();
            reg.create(ty, 800.0, 400.0);
        }
        reg
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut reg = registry_with(&["car", "ball"]);
        let ids: Vec<_> = reg.list().iter().map(|i| i.id).collect();
        assert_eq!(ids, [InstanceId(1), InstanceId(2)]);

        assert!(reg.remove(InstanceId(2)));
        let catalog = Catalog::default();
        let id = reg.create(catalog.find("dog").unwrap(), 800.0, 400.0).id;
        assert_eq!(id, InstanceId(3));

        reg.clear();
        let id = reg.create(catalog.find("dog").unwrap(), 800.0, 400.0).id;
        assert_eq!(id, InstanceId(4));
    }

    #[test]
    fn create_applies_catalog_defaults() {
        let reg = registry_with(&["rocket"]);
        let rocket = &reg.list()[0];
        assert_eq!(rocket.mass, 20000.0);
        assert_eq!(rocket.velocity, 40.0);
        assert_eq!(rocket.y, 200.0);
        assert!(rocket.x >= 20.0 && rocket.x < 180.0);
        assert!(rocket.leg_phase >= 0.0 && rocket.leg_phase < TAU);
        assert_eq!(rocket.direction, Direction::Right);
    }

    #[test]
    fn seeded_placement_is_reproducible() {
        let a = registry_with(&["car", "dog"]);
        let b = registry_with(&["car", "dog"]);
        assert_eq!(a.list(), b.list());
    }

    #[test]
    fn remove_twice_is_noop() {
        let mut reg = registry_with(&["car", "ball", "dog"]);
        assert!(reg.remove(InstanceId(2)));
        assert_eq!(reg.len(), 2);
        assert!(!reg.remove(InstanceId(2)));
        assert_eq!(reg.len(), 2);
        assert!(!reg.remove(InstanceId(99)));
    }

    #[test]
    fn non_finite_edits_become_zero() {
        let mut reg = registry_with(&["car"]);
        let id = reg.list()[0].id;
        reg.update_field(id, Field::Mass, f64::NAN);
        reg.update_field(id, Field::Velocity, f64::INFINITY);
        let car = reg.get(id).unwrap();
        assert_eq!(car.mass, 0.0);
        assert_eq!(car.velocity, 0.0);

        reg.update_field(id, Field::Velocity, -3.5);
        assert_eq!(reg.get(id).unwrap().velocity, -3.5);
    }

    #[test]
    fn edits_to_unknown_ids_are_ignored() {
        let mut reg = registry_with(&["car"]);
        let before = reg.list().to_vec();
        reg.update_field(InstanceId(42), Field::Mass, 5.0);
        assert_eq!(reg.list(), &before[..]);
    }
}
