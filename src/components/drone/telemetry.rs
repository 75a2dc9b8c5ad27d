use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::drone::{ActuatorOutput, ControlState, FlightState, Stage};

/// Serializable summary of a drone after a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub name: String,
    pub stage: Stage,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
    pub actuators: ActuatorOutput,
    pub crashed: Option<String>,
}

impl TelemetrySnapshot {
    pub fn capture(
        name: &str,
        state: &FlightState,
        control: &ControlState,
        actuators: &ActuatorOutput,
        crashed: Option<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            stage: control.stage,
            position: state.position,
            velocity: state.velocity,
            heading: state.heading,
            pitch: state.pitch,
            roll: state.roll,
            actuators: *actuators,
            crashed,
        }
    }
}
