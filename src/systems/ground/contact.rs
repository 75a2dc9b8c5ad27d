use nalgebra::{Matrix4, Vector3};

use crate::components::{WheelPosition, WheelState};
use crate::systems::frames::transform_vector;
use crate::utils::sign;

/// Result of evaluating one wheel against the ground for a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelContact {
    pub id: WheelPosition,
    /// Normal, friction and brake force, body frame [N].
    pub force: Vector3<f64>,
    /// Moment of `force` about the centre of mass, body frame [N m].
    pub moment: Vector3<f64>,
    pub compression: f64,
    pub pressed: bool,
}

/// Kinematic inputs shared by all wheels in one tick.
pub struct ContactFrame<'a> {
    /// Drone position, world frame.
    pub position: &'a Vector3<f64>,
    pub to_world: &'a Matrix4<f64>,
    pub to_body: &'a Matrix4<f64>,
    /// Drone velocity, body frame.
    pub velocity: &'a Vector3<f64>,
    /// Drone angular velocity, body frame.
    pub angular_velocity: &'a Vector3<f64>,
    pub dt: f64,
}

/// World height of a wheel centre.
pub fn wheel_height(wheel: &WheelState, position: &Vector3<f64>, to_world: &Matrix4<f64>) -> f64 {
    position.y + transform_vector(to_world, &wheel.position).y
}

/// Spring-damper normal force plus lateral friction and braking for one wheel.
pub fn wheel_contact(wheel: &WheelState, brake: f64, frame: &ContactFrame) -> WheelContact {
    let height = wheel_height(wheel, frame.position, frame.to_world);
    let compression = (wheel.radius - height).max(0.0);
    let pressed = height < wheel.radius;

    let compression_rate = if frame.dt > 0.0 {
        (compression - wheel.compression) / frame.dt
    } else {
        0.0
    };
    let normal = (compression * wheel.tire_slope + wheel.damper_slope * compression_rate).max(0.0);

    let mut force = transform_vector(frame.to_body, &Vector3::y()) * normal;

    if pressed {
        let contact_velocity = frame.velocity + frame.angular_velocity.cross(&wheel.position);
        force.x += -wheel.max_friction * contact_velocity.x * normal.abs();
        force.z += -sign(contact_velocity.z) * brake.clamp(0.0, wheel.max_brake);
    }

    WheelContact {
        id: wheel.id,
        force,
        moment: wheel.position.cross(&force),
        compression,
        pressed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{DroneConfig, Wheels};
    use crate::systems::frames::{body_to_world, world_to_body};
    use approx::assert_relative_eq;

    struct Fixture {
        position: Vector3<f64>,
        to_world: Matrix4<f64>,
        to_body: Matrix4<f64>,
        velocity: Vector3<f64>,
        angular_velocity: Vector3<f64>,
    }

    impl Fixture {
        fn level(altitude: f64, velocity: Vector3<f64>) -> Self {
            Self {
                position: Vector3::new(0.0, altitude, 0.0),
                to_world: body_to_world(0.0, 0.0, 0.0),
                to_body: world_to_body(0.0, 0.0, 0.0),
                velocity,
                angular_velocity: Vector3::zeros(),
            }
        }

        fn frame(&self, dt: f64) -> ContactFrame<'_> {
            ContactFrame {
                position: &self.position,
                to_world: &self.to_world,
                to_body: &self.to_body,
                velocity: &self.velocity,
                angular_velocity: &self.angular_velocity,
                dt,
            }
        }
    }

    #[test]
    fn test_airborne_wheel_is_free() {
        let wheels = Wheels::from_config(&DroneConfig::default());
        let fixture = Fixture::level(10.0, Vector3::new(0.0, 0.0, -20.0));
        let contact = wheel_contact(&wheels.front, 500.0, &fixture.frame(0.01));

        assert!(!contact.pressed);
        assert_eq!(contact.compression, 0.0);
        assert_eq!(contact.force, Vector3::zeros());
    }

    #[test]
    fn test_compressed_wheel_pushes_up() {
        let mut wheels = Wheels::from_config(&DroneConfig::default());
        // Wheel centre at y = 1.15 - 1.0 = 0.15, radius 0.2
        wheels.front.compression = 0.05;
        let fixture = Fixture::level(1.15, Vector3::zeros());
        let contact = wheel_contact(&wheels.front, 0.0, &fixture.frame(0.01));

        assert!(contact.pressed);
        assert_relative_eq!(contact.compression, 0.05, epsilon = 1e-12);
        assert_relative_eq!(contact.force.y, 0.05 * 5000.0, epsilon = 1e-6);
        assert_relative_eq!(contact.force.x, 0.0);
        assert_relative_eq!(contact.force.z, 0.0);
    }

    #[test]
    fn test_damper_adds_to_normal_force_while_compressing() {
        let wheels = Wheels::from_config(&DroneConfig::default());
        let fixture = Fixture::level(1.15, Vector3::zeros());
        let contact = wheel_contact(&wheels.left, 0.0, &fixture.frame(0.01));
        // 0.05 * 5000 + 1000 * (0.05 / 0.01)
        assert_relative_eq!(contact.force.y, 250.0 + 5000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_extension_cannot_pull_down() {
        let mut wheels = Wheels::from_config(&DroneConfig::default());
        wheels.right.compression = 0.2;
        let fixture = Fixture::level(1.15, Vector3::zeros());
        let contact = wheel_contact(&wheels.right, 0.0, &fixture.frame(0.01));
        assert_eq!(contact.force.y, 0.0);
    }

    #[test]
    fn test_brake_opposes_rolling_direction() {
        let mut wheels = Wheels::from_config(&DroneConfig::default());
        wheels.left.compression = 0.05;
        let fixture = Fixture::level(1.15, Vector3::new(0.0, 0.0, -10.0));
        let contact = wheel_contact(&wheels.left, 300.0, &fixture.frame(0.01));
        assert_relative_eq!(contact.force.z, 300.0);

        // Commanded brake is clamped to the wheel's maximum
        let contact = wheel_contact(&wheels.left, 9000.0, &fixture.frame(0.01));
        assert_relative_eq!(contact.force.z, 500.0);

        // No rolling, no brake force
        let fixture = Fixture::level(1.15, Vector3::zeros());
        let contact = wheel_contact(&wheels.left, 300.0, &fixture.frame(0.01));
        assert_eq!(contact.force.z, 0.0);
    }

    #[test]
    fn test_friction_opposes_sideslip() {
        let mut wheels = Wheels::from_config(&DroneConfig::default());
        wheels.front.compression = 0.05;
        let fixture = Fixture::level(1.15, Vector3::new(2.0, 0.0, 0.0));
        let contact = wheel_contact(&wheels.front, 0.0, &fixture.frame(0.01));
        assert_relative_eq!(contact.force.x, -0.5 * 2.0 * 250.0, epsilon = 1e-6);
    }

    #[test]
    fn test_moment_is_lever_arm_cross_force() {
        let mut wheels = Wheels::from_config(&DroneConfig::default());
        wheels.left.compression = 0.05;
        let fixture = Fixture::level(1.15, Vector3::zeros());
        let contact = wheel_contact(&wheels.left, 0.0, &fixture.frame(0.01));
        assert_relative_eq!(contact.moment, wheels.left.position.cross(&contact.force));
        // Left wheel pushed up rolls the drone right-wing-down
        assert!(contact.moment.z < 0.0);
    }
}
