use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::types::Rgb;

/// Stable identity of an instance. Assigned monotonically, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

const PALETTE: [&str; 8] = [
    "#ef4444", "#0891b2", "#6366f1", "#f97316", "#10b981", "#7c3aed", "#f59e0b", "#0ea5a4",
];

/// Cyclic palette lookup keyed on the instance id.
pub fn palette_color(id: InstanceId) -> Rgb {
    let hex = PALETTE[id.0 as usize % PALETTE.len()];
    Rgb::from_hex(hex).unwrap_or(Rgb::BLACK)
}

/// Horizontal facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
}

impl Direction {
    pub fn from_sign(v: f64) -> Self {
        if v >= 0.0 { Direction::Right } else { Direction::Left }
    }

    /// +1.0 for right, -1.0 for left.
    pub fn signum(self) -> f64 {
        match self {
            Direction::Right => 1.0,
            Direction::Left => -1.0,
        }
    }
}

/// Which numeric field a live edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Mass,
    Velocity,
}

/// One user-created animated object.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub id: InstanceId,
    pub key: String,
    pub label: String,
    pub icon: String,
    pub category: Category,
    /// Kilograms.
    pub mass: f64,
    /// Meters per second.
    pub velocity: f64,
    pub direction: Direction,
    pub x: f64,
    pub y: f64,
    /// Wheel spin, ball roll and rocket flicker phase. Unbounded.
    pub rotation_angle: f64,
    /// Gait phase for walkers. Unbounded.
    pub leg_phase: f64,
    pub color: Rgb,
    pub scale: f64,
}

impl Instance {
    /// Mass times velocity. Finite as long as the registry's input
    /// coercion holds.
    pub fn momentum(&self) -> f64 {
        self.mass * self.velocity
    }
}
