use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::systems::CrashError;
use crate::utils::REST_SPEED_SQUARED;

/// The four lifting surfaces of the airframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    LeftWing,
    RightWing,
    HorizontalStabilizer,
    VerticalStabilizer,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Surface::LeftWing => "left wing",
            Surface::RightWing => "right wing",
            Surface::HorizontalStabilizer => "horizontal stabilizer",
            Surface::VerticalStabilizer => "vertical stabilizer",
        };
        f.write_str(name)
    }
}

impl Surface {
    /// Axis the surface rotates about when inclined (body frame).
    pub fn rotation_axis(&self) -> Vector3<f64> {
        match self {
            Surface::VerticalStabilizer => Vector3::y(),
            _ => Vector3::x(),
        }
    }

    /// Chord direction of the surface at the given inclination (body frame).
    pub fn attack_vector(&self, inclination: f64) -> Vector3<f64> {
        match self {
            Surface::VerticalStabilizer => {
                Vector3::new(-inclination.sin(), 0.0, -inclination.cos())
            }
            _ => wing_attack_vector(inclination),
        }
    }
}

/// Chord direction of a wing or horizontal stabilizer.
pub fn wing_attack_vector(inclination: f64) -> Vector3<f64> {
    Vector3::new(0.0, inclination.sin(), -inclination.cos())
}

/// Remove the component of `airspeed` along `rotation_axis`.
fn project(airspeed: &Vector3<f64>, rotation_axis: &Vector3<f64>) -> Vector3<f64> {
    let axis = rotation_axis.normalize();
    airspeed - axis * airspeed.dot(&axis)
}

/// Signed angle of attack of a surface moving with `airspeed` (its velocity
/// through still air, body frame).
pub fn angle_of_attack(
    airspeed: &Vector3<f64>,
    attack_vector: &Vector3<f64>,
    rotation_axis: &Vector3<f64>,
) -> f64 {
    let projected = project(airspeed, rotation_axis);
    let normal = rotation_axis.cross(attack_vector);
    -projected.dot(&normal).atan2(projected.dot(attack_vector))
}

/// Lift on a surface: `lift_slope * aoa * |projected airspeed|^2` along the
/// surface normal.
pub fn lift_force(
    airspeed: &Vector3<f64>,
    attack_vector: &Vector3<f64>,
    rotation_axis: &Vector3<f64>,
    lift_slope: f64,
) -> Vector3<f64> {
    let projected = project(airspeed, rotation_axis);
    let speed_squared = projected.norm_squared();
    if speed_squared == 0.0 {
        return Vector3::zeros();
    }
    let normal = rotation_axis.cross(attack_vector);
    let aoa = -projected.dot(&normal).atan2(projected.dot(attack_vector));
    normal * (lift_slope * aoa * speed_squared)
}

/// [`lift_force`] with the structural limit applied: an AOA beyond `max_aoa`
/// that still produces more than `threshold` of vertical lift is a stall.
/// Reverse and negligible airflow never stall.
pub fn checked_lift_force(
    surface: Surface,
    airspeed: &Vector3<f64>,
    inclination: f64,
    lift_slope: f64,
    max_aoa: f64,
    threshold: f64,
) -> Result<Vector3<f64>, CrashError> {
    let attack = surface.attack_vector(inclination);
    let axis = surface.rotation_axis();
    let lift = lift_force(airspeed, &attack, &axis, lift_slope);
    let aoa = angle_of_attack(airspeed, &attack, &axis);

    let projected = project(airspeed, &axis);
    if projected.norm_squared() < REST_SPEED_SQUARED || projected.dot(&attack) < 0.0 {
        return Ok(lift);
    }
    if aoa.abs() > max_aoa && lift.y.abs() > threshold {
        return Err(CrashError::AerodynamicLimitExceeded { surface, aoa });
    }
    Ok(lift)
}
