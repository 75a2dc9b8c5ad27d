use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::components::WheelPosition;
use crate::systems::aerodynamics::Surface;

/// Airframe points that must stay above the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AirframePoint {
    Wheel(WheelPosition),
    LeftWingtip,
    RightWingtip,
    Tail,
    Engine,
}

impl fmt::Display for AirframePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirframePoint::Wheel(id) => write!(f, "{id:?} wheel"),
            AirframePoint::LeftWingtip => f.write_str("left wingtip"),
            AirframePoint::RightWingtip => f.write_str("right wingtip"),
            AirframePoint::Tail => f.write_str("tail"),
            AirframePoint::Engine => f.write_str("engine"),
        }
    }
}

/// Physically invalid outcomes of a tick. Both end the flight of the drone.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CrashError {
    #[error("{surface} exceeded the maximum angle of attack (aoa = {aoa:.4} rad)")]
    AerodynamicLimitExceeded { surface: Surface, aoa: f64 },

    #[error("{part} went below ground at ({:.3}, {:.3}, {:.3})", point.x, point.y, point.z)]
    GroundPenetration {
        part: AirframePoint,
        point: Vector3<f64>,
    },
}
