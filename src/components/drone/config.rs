use bevy::prelude::*;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::components::drone::loader::ConfigError;
use crate::utils::{GRAVITY, STALL_LIFT_RATIO};

/// Static description of one wheel, in the body frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSpec {
    /// Wheel centre relative to the centre of mass (m).
    pub position: Vector3<f64>,
    /// Tyre radius (m).
    pub radius: f64,
    /// Tyre stiffness (N/m of compression).
    pub tire_slope: f64,
    /// Damper slope (N per m/s of compression rate).
    pub damper_slope: f64,
    /// Maximum lateral friction coefficient.
    pub max_friction: f64,
}

/// The three wheels of the undercarriage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndercarriageConfig {
    pub front: WheelSpec,
    pub left: WheelSpec,
    pub right: WheelSpec,
}

impl Default for UndercarriageConfig {
    fn default() -> Self {
        let wheel = |x: f64, z: f64| WheelSpec {
            position: Vector3::new(x, -1.0, z),
            radius: 0.2,
            tire_slope: 5000.0,
            damper_slope: 1000.0,
            max_friction: 0.5,
        };
        Self {
            front: wheel(0.0, -2.0),
            left: wheel(-1.5, 1.0),
            right: wheel(1.5, 1.0),
        }
    }
}

/// Immutable drone parameters: masses, geometry, aerodynamic slopes and the
/// undercarriage. Loaded once and never mutated afterwards.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneConfig {
    /// Name of the drone.
    pub name: String,
    /// Gravitational acceleration (m/s^2).
    pub gravity: f64,
    /// Engine point mass (kg), placed on the longitudinal axis ahead of the centre of mass.
    pub engine_mass: f64,
    /// Mass of each wing (kg), lumped at the wing's half-span.
    pub wing_mass: f64,
    /// Tail point mass (kg).
    pub tail_mass: f64,
    /// Distance from the centre of mass to each wing's centre of lift (m).
    pub wing_x: f64,
    /// Distance from the centre of mass to the tail (m).
    pub tail_size: f64,
    /// Maximum engine thrust (N).
    pub max_thrust: f64,
    /// Maximum angle of attack any surface may fly at (rad).
    pub max_aoa: f64,
    /// Lift slope of each wing.
    pub wing_lift_slope: f64,
    /// Lift slope of the horizontal stabilizer.
    pub horizontal_stab_lift_slope: f64,
    /// Lift slope of the vertical stabilizer.
    pub vertical_stab_lift_slope: f64,
    /// Maximum brake force of a single wheel (N).
    pub max_brake: f64,
    /// Fraction of the weight a surface must lift at an over-limit AOA for
    /// the flight to count as stalled.
    #[serde(default = "default_stall_lift_ratio")]
    pub stall_lift_ratio: f64,
    pub wheels: UndercarriageConfig,
}

fn default_stall_lift_ratio() -> f64 {
    STALL_LIFT_RATIO
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            name: "default_drone".to_string(),
            gravity: GRAVITY,
            engine_mass: 20.0,
            wing_mass: 10.0,
            tail_mass: 5.0,
            wing_x: 4.0,
            tail_size: 4.0,
            max_thrust: 2000.0,
            max_aoa: PI / 12.0,
            wing_lift_slope: 2.5,
            horizontal_stab_lift_slope: 1.25,
            vertical_stab_lift_slope: 1.0,
            max_brake: 500.0,
            stall_lift_ratio: STALL_LIFT_RATIO,
            wheels: UndercarriageConfig::default(),
        }
    }
}

impl DroneConfig {
    /// Vertical lift (N) that makes an over-limit AOA a stall.
    pub fn stall_lift_threshold(&self) -> f64 {
        self.stall_lift_ratio * self.weight()
    }

    /// Total mass of the airframe (kg).
    pub fn total_mass(&self) -> f64 {
        self.engine_mass + 2.0 * self.wing_mass + self.tail_mass
    }

    /// Weight of the airframe (N).
    pub fn weight(&self) -> f64 {
        self.total_mass() * self.gravity
    }

    /// Body z of the engine, chosen so the centre of mass sits at the origin.
    pub fn engine_z(&self) -> f64 {
        -self.tail_mass * self.tail_size / self.engine_mass
    }

    /// Diagonal body-frame inertia tensor built from the point masses.
    pub fn inertia(&self) -> Matrix3<f64> {
        let axial = self.engine_mass * self.engine_z().powi(2)
            + self.tail_mass * self.tail_size.powi(2);
        let span = 2.0 * self.wing_mass * self.wing_x.powi(2);
        Matrix3::from_diagonal(&Vector3::new(axial, axial + span, span))
    }

    /// Inverse of [`DroneConfig::inertia`].
    pub fn inertia_inv(&self) -> Matrix3<f64> {
        self.inertia().try_inverse().unwrap_or_else(|| {
            error!("Inertia matrix is uninvertable, defaulting to zero matrix.");
            Matrix3::zeros()
        })
    }

    /// Body-frame positions of the left and right wings' centres of lift.
    pub fn left_wing_position(&self) -> Vector3<f64> {
        Vector3::new(-self.wing_x, 0.0, 0.0)
    }

    pub fn right_wing_position(&self) -> Vector3<f64> {
        Vector3::new(self.wing_x, 0.0, 0.0)
    }

    pub fn tail_position(&self) -> Vector3<f64> {
        Vector3::new(0.0, 0.0, self.tail_size)
    }

    pub fn engine_position(&self) -> Vector3<f64> {
        Vector3::new(0.0, 0.0, self.engine_z())
    }

    /// Checks every parameter for physical sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("gravity", self.gravity),
            ("engine_mass", self.engine_mass),
            ("wing_mass", self.wing_mass),
            ("tail_mass", self.tail_mass),
            ("wing_x", self.wing_x),
            ("tail_size", self.tail_size),
            ("max_thrust", self.max_thrust),
            ("wing_lift_slope", self.wing_lift_slope),
            ("horizontal_stab_lift_slope", self.horizontal_stab_lift_slope),
            ("vertical_stab_lift_slope", self.vertical_stab_lift_slope),
            ("max_brake", self.max_brake),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        if !(self.max_aoa > 0.0 && self.max_aoa < PI / 2.0) {
            return Err(ConfigError::ValidationError(format!(
                "max_aoa must lie in (0, pi/2), got {}",
                self.max_aoa
            )));
        }

        if !(self.stall_lift_ratio >= 0.0) {
            return Err(ConfigError::ValidationError(
                "stall_lift_ratio must not be negative".to_string(),
            ));
        }

        for (label, wheel) in [
            ("front", &self.wheels.front),
            ("left", &self.wheels.left),
            ("right", &self.wheels.right),
        ] {
            if !(wheel.radius > 0.0 && wheel.tire_slope > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{label} wheel needs a positive radius and tyre slope"
                )));
            }
            if wheel.damper_slope < 0.0 || wheel.max_friction < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{label} wheel damper and friction must not be negative"
                )));
            }
            if !wheel.position.iter().all(|v| v.is_finite()) {
                return Err(ConfigError::ValidationError(format!(
                    "{label} wheel position is not finite"
                )));
            }
        }

        Ok(())
    }
}
