use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::drone::control::ControlState;

/// Actuator demands for one tick. Stabilizer inclinations are held at zero by
/// the autopilot.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ActuatorOutput {
    pub left_wing_inclination: f64,
    pub right_wing_inclination: f64,
    pub horizontal_stabilizer_inclination: f64,
    pub vertical_stabilizer_inclination: f64,
    pub thrust: f64,
    pub front_brake: f64,
    pub left_brake: f64,
    pub right_brake: f64,
}

impl From<&ControlState> for ActuatorOutput {
    fn from(state: &ControlState) -> Self {
        Self {
            left_wing_inclination: state.left_inclination,
            right_wing_inclination: state.right_inclination,
            horizontal_stabilizer_inclination: 0.0,
            vertical_stabilizer_inclination: 0.0,
            thrust: state.thrust,
            front_brake: state.brakes.front,
            left_brake: state.brakes.left,
            right_brake: state.brakes.right,
        }
    }
}
