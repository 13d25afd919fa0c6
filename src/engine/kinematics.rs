//! Kinematic updater — advances position and phase accumulators per frame.
//!
//! Velocity maps to on-screen motion through fixed scale factors. None of
//! this is physically exact; the constants only keep the animation readable.

use serde::{Deserialize, Serialize};

use super::instance::{Direction, Instance};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicParams {
    /// Below this |velocity| the facing direction is held.
    pub epsilon: f64,
    /// m/s to px/frame.
    pub speed_scale: f64,
    pub rotation_scale: f64,
    /// Gait advance per frame at rest.
    pub base_gait_rate: f64,
    pub gait_speed_coeff: f64,
    /// Off-screen distance before wrapping; must exceed the widest sprite half-width.
    pub wrap_margin: f64,
}

impl Default for KinematicParams {
    fn default() -> Self {
        KinematicParams {
            epsilon: 0.001,
            speed_scale: 0.4,
            rotation_scale: 0.05,
            base_gait_rate: 0.12,
            gait_speed_coeff: 0.005,
            wrap_margin: 100.0,
        }
    }
}

/// Advance one instance by one frame on a canvas `canvas_width` pixels wide.
pub fn advance(inst: &mut Instance, canvas_width: f64, params: &KinematicParams) {
    let v = inst.velocity;

    if v.abs() > params.epsilon {
        inst.direction = Direction::from_sign(v);
    }
    let dir = inst.direction.signum();

    // speed comes from the magnitude, heading from the held direction
    inst.x += v.abs() * params.speed_scale * dir;

    let m = params.wrap_margin;
    if inst.x > canvas_width + m {
        inst.x = -m;
    } else if inst.x < -m {
        inst.x = canvas_width + m;
    }

    inst.rotation_angle += v * params.rotation_scale * dir;
    inst.leg_phase += params.base_gait_rate + v.abs() * params.gait_speed_coeff;
}
