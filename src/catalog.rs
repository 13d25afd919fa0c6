//! Object-type catalog.
//!
//! The catalog is read-only once the simulation starts. Entries map a
//! user-facing key (`"car"`, `"dog"`, ...) to the defaults an instance is
//! created with and the `Category` that picks its sprite.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Car,
    Motorcycle,
    Bicycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkerKind {
    Dog,
    Person,
}

/// The closed set of object kinds. Serialized as `"ball"` or
/// `{"vehicle": "car"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Vehicle(VehicleKind),
    Ball,
    Rocket,
    Walker(WalkerKind),
    Aircraft,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Vehicle(_) => "vehicle",
            Category::Ball => "ball",
            Category::Rocket => "rocket",
            Category::Walker(_) => "walker",
            Category::Aircraft => "aircraft",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub icon: String,
    pub default_mass: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    pub category: Category,
}

fn default_scale() -> f64 {
    1.0
}

impl ObjectType {
    fn builtin(
        key: &str,
        label: &str,
        icon: &str,
        default_mass: f64,
        scale: f64,
        category: Category,
    ) -> Self {
        ObjectType {
            key: key.into(),
            label: label.into(),
            icon: icon.into(),
            default_mass,
            scale,
            category,
        }
    }

    /// Velocity a freshly added instance starts with: heavier things start
    /// faster, never slower than 0.5 m/s.
    pub fn starting_velocity(&self) -> f64 {
        ((self.default_mass / 100.0) * 0.2).round().max(0.5)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<ObjectType>,
}

impl Default for Catalog {
    fn default() -> Self {
        use Category::*;
        Catalog {
            entries: vec![
                ObjectType::builtin("car", "Car", "🚗", 1200.0, 1.0, Vehicle(VehicleKind::Car)),
                ObjectType::builtin("motorcycle", "Motorcycle", "🛵", 200.0, 0.8, Vehicle(VehicleKind::Motorcycle)),
                ObjectType::builtin("bicycle", "Bicycle", "🚲", 15.0, 0.7, Vehicle(VehicleKind::Bicycle)),
                ObjectType::builtin("ball", "Ball", "⚽", 0.45, 0.5, Ball),
                ObjectType::builtin("rocket", "Rocket", "🚀", 20000.0, 1.0, Rocket),
                ObjectType::builtin("dog", "Dog", "🐶", 18.0, 0.6, Walker(WalkerKind::Dog)),
                ObjectType::builtin("walker", "Walking Person", "🚶", 70.0, 0.8, Walker(WalkerKind::Person)),
                ObjectType::builtin("airplane", "Airplane", "✈", 40000.0, 1.6, Aircraft),
            ],
        }
    }
}

impl Catalog {
    pub fn new(entries: Vec<ObjectType>) -> Self {
        Catalog { entries }
    }

    /// Parse a catalog from a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn find(&self, key: &str) -> Option<&ObjectType> {
        self.entries.iter().find(|t| t.key == key)
    }

    pub fn entries(&self) -> &[ObjectType] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
