use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Rigid-body state of a drone, owned and advanced by the integrator.
///
/// Orientation is stored as heading/pitch/roll but the integrator never sums
/// Euler rates into it: the angles are re-derived every tick from the rotated
/// forward and right vectors.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    /// Position in world space [m], Y up.
    pub position: Vector3<f64>,
    /// Linear velocity in world space [m/s].
    pub velocity: Vector3<f64>,
    /// Angular velocity in world space [rad/s].
    pub angular_velocity: Vector3<f64>,
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
    /// Duration of the last tick [s].
    pub elapsed: f64,
}

impl Default for FlightState {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            heading: 0.0,
            pitch: 0.0,
            roll: 0.0,
            elapsed: 0.0,
        }
    }
}

impl FlightState {
    /// Create a state at rest at the given position and heading.
    pub fn at_position(position: Vector3<f64>, heading: f64) -> Self {
        Self {
            position,
            heading,
            ..Default::default()
        }
    }

    /// Create a state in level flight along the heading.
    pub fn in_level_flight(position: Vector3<f64>, heading: f64, speed: f64) -> Self {
        let velocity = Vector3::new(-heading.sin(), 0.0, -heading.cos()) * speed;
        Self {
            position,
            velocity,
            heading,
            ..Default::default()
        }
    }

    pub fn speed_squared(&self) -> f64 {
        self.velocity.norm_squared()
    }

    /// What the external sensor collaborator reports for this state.
    pub fn sense(&self) -> SensedState {
        SensedState {
            position: self.position,
            heading: self.heading,
            pitch: self.pitch,
            roll: self.roll,
            elapsed: self.elapsed,
        }
    }
}

/// One telemetry sample: world position, attitude and time since the last sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensedState {
    pub position: Vector3<f64>,
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
    pub elapsed: f64,
}

impl SensedState {
    pub fn altitude(&self) -> f64 {
        self.position.y
    }
}
