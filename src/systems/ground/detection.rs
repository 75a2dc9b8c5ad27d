use nalgebra::{Matrix4, Vector3};

use crate::components::{DroneConfig, Wheels};
use crate::systems::frames::transform_point;
use crate::systems::physics::{AirframePoint, CrashError};

/// Body-frame points of the airframe that may never touch the ground.
pub fn airframe_points(config: &DroneConfig) -> [(AirframePoint, Vector3<f64>); 4] {
    [
        (AirframePoint::LeftWingtip, config.left_wing_position()),
        (AirframePoint::RightWingtip, config.right_wing_position()),
        (AirframePoint::Tail, config.tail_position()),
        (AirframePoint::Engine, config.engine_position()),
    ]
}

/// Fails with the first wheel centre or airframe point found below ground.
///
/// `to_world` must include the translation to the drone position.
pub fn check_ground_penetration(
    config: &DroneConfig,
    wheels: &Wheels,
    to_world: &Matrix4<f64>,
) -> Result<(), CrashError> {
    let wheel_points = wheels
        .iter()
        .map(|wheel| (AirframePoint::Wheel(wheel.id), wheel.position));

    for (part, body_point) in wheel_points.chain(airframe_points(config)) {
        let point = transform_point(to_world, &body_point);
        if point.y < 0.0 {
            return Err(CrashError::GroundPenetration { part, point });
        }
    }
    Ok(())
}
