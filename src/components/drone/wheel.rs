use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::drone::config::{DroneConfig, WheelSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WheelPosition {
    Front,
    Left,
    Right,
}

/// Per-wheel contact state. Geometry is fixed; compression, brake and
/// `pressed` change every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelState {
    pub id: WheelPosition,
    /// Wheel centre in the body frame [m].
    pub position: Vector3<f64>,
    pub radius: f64,
    pub tire_slope: f64,
    pub damper_slope: f64,
    pub max_friction: f64,
    pub max_brake: f64,
    /// Current tyre compression depth [m].
    pub compression: f64,
    /// Current brake force, always within `[0, max_brake]`.
    brake: f64,
    /// True when the wheel centre is closer to the ground than its radius.
    pub pressed: bool,
}

impl WheelState {
    pub fn new(id: WheelPosition, spec: &WheelSpec, max_brake: f64) -> Self {
        Self {
            id,
            position: spec.position,
            radius: spec.radius,
            tire_slope: spec.tire_slope,
            damper_slope: spec.damper_slope,
            max_friction: spec.max_friction,
            max_brake,
            compression: 0.0,
            brake: 0.0,
            pressed: false,
        }
    }

    pub fn brake(&self) -> f64 {
        self.brake
    }

    /// Store a commanded brake force, clamped to `[0, max_brake]`.
    pub fn set_brake(&mut self, force: f64) {
        self.brake = if force.is_nan() {
            0.0
        } else {
            force.clamp(0.0, self.max_brake)
        };
    }
}

/// The drone's undercarriage.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wheels {
    pub front: WheelState,
    pub left: WheelState,
    pub right: WheelState,
}

impl Wheels {
    pub fn from_config(config: &DroneConfig) -> Self {
        Self {
            front: WheelState::new(WheelPosition::Front, &config.wheels.front, config.max_brake),
            left: WheelState::new(WheelPosition::Left, &config.wheels.left, config.max_brake),
            right: WheelState::new(WheelPosition::Right, &config.wheels.right, config.max_brake),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &WheelState> {
        [&self.front, &self.left, &self.right].into_iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WheelState> {
        [&mut self.front, &mut self.left, &mut self.right].into_iter()
    }

    pub fn any_pressed(&self) -> bool {
        self.iter().any(|wheel| wheel.pressed)
    }
}
