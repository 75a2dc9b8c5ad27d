use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::utils::{COMMAND_SANITY_BOUND, DEFAULT_MAX_ROLL};

/// Externally commanded flight phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stage {
    TakeOff,
    Taxi,
    Land,
    Fly,
    #[default]
    Free,
    Phone,
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "takeoff" => Ok(Stage::TakeOff),
            "taxi" => Ok(Stage::Taxi),
            "land" => Ok(Stage::Land),
            "fly" => Ok(Stage::Fly),
            "free" => Ok(Stage::Free),
            "phone" => Ok(Stage::Phone),
            other => Err(format!("unknown stage '{other}'")),
        }
    }
}

/// The stage command supplied each tick, together with optional requested
/// pitch and heading (radians).
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StageCommand {
    pub stage: Stage,
    /// In `[0, 1]`; out of range values are clamped.
    pub speed_factor: f64,
    pub requested_pitch: Option<f64>,
    pub requested_heading: Option<f64>,
}

impl StageCommand {
    pub fn new(stage: Stage, speed_factor: f64) -> Self {
        Self {
            stage,
            speed_factor,
            ..Default::default()
        }
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.requested_pitch = Some(pitch);
        self
    }

    pub fn with_heading(mut self, heading: f64) -> Self {
        self.requested_heading = Some(heading);
        self
    }
}

/// Which FLY-stage override rewrote the requested pitch on the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlyOverride {
    BankLimit,
    AntiCrash,
    LowAltitude,
    Overspeed,
    BankCompensation,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BrakeForces {
    pub front: f64,
    pub left: f64,
    pub right: f64,
}

impl BrakeForces {
    pub fn all(force: f64) -> Self {
        Self {
            front: force,
            left: force,
            right: force,
        }
    }
}

/// Mutable autopilot state, persisted between ticks of one drone.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    pub stage: Stage,
    /// Stage a PHONE datagram last asked for.
    pub phone_stage: Stage,
    pub speed_factor: f64,
    /// Pitch the airborne solves aim for on the current tick.
    pub requested_pitch: f64,
    /// Pitch last commanded from outside. FLY overrides start from it every
    /// tick and never write back to it.
    pub commanded_pitch: f64,
    pub requested_heading: f64,
    pub requested_speed_squared: f64,
    pub average_inclination: f64,
    pub differential_inclination: f64,
    pub left_inclination: f64,
    pub right_inclination: f64,
    pub thrust: f64,
    pub brakes: BrakeForces,
    /// Adaptive roll envelope [rad].
    pub max_roll: f64,
    /// Set when the AOA guard had to pull the average inclination back.
    pub max_aoa_reached: bool,
    pub fly_override: Option<FlyOverride>,
    /// Previous telemetry sample, for velocity and roll-rate estimation.
    pub previous_position: Option<nalgebra::Vector3<f64>>,
    pub previous_roll: Option<f64>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ControlState {
    pub fn new(initial_heading: f64) -> Self {
        Self {
            stage: Stage::Free,
            phone_stage: Stage::Free,
            speed_factor: 0.0,
            requested_pitch: 0.0,
            commanded_pitch: 0.0,
            requested_heading: initial_heading,
            requested_speed_squared: 0.0,
            average_inclination: 0.0,
            differential_inclination: 0.0,
            left_inclination: 0.0,
            right_inclination: 0.0,
            thrust: 0.0,
            brakes: BrakeForces::default(),
            max_roll: DEFAULT_MAX_ROLL,
            max_aoa_reached: false,
            fly_override: None,
            previous_position: None,
            previous_roll: None,
        }
    }

    /// Commanded pitch, unless the value is outside the sanity bound.
    pub fn request_pitch(&mut self, pitch: f64) -> bool {
        if is_sane(pitch) {
            self.commanded_pitch = pitch;
            true
        } else {
            false
        }
    }

    /// Requested heading, unless the value is outside the sanity bound.
    pub fn request_heading(&mut self, heading: f64) -> bool {
        if is_sane(heading) {
            self.requested_heading = heading;
            true
        } else {
            false
        }
    }

    /// Take over stage, speed factor and any sane pitch/heading request.
    /// Under PHONE the speed factor comes from datagrams instead.
    pub fn absorb(&mut self, command: &StageCommand) {
        self.stage = command.stage;
        if command.stage != Stage::Phone && command.speed_factor.is_finite() {
            self.speed_factor = command.speed_factor.clamp(0.0, 1.0);
        }
        if let Some(pitch) = command.requested_pitch {
            if !self.request_pitch(pitch) {
                warn!("Ignoring requested pitch {pitch}: outside sanity bound");
            }
        }
        if let Some(heading) = command.requested_heading {
            if !self.request_heading(heading) {
                warn!("Ignoring requested heading {heading}: outside sanity bound");
            }
        }
    }

    /// Zero every actuator demand.
    pub fn reset_outputs(&mut self) {
        self.average_inclination = 0.0;
        self.differential_inclination = 0.0;
        self.left_inclination = 0.0;
        self.right_inclination = 0.0;
        self.thrust = 0.0;
        self.brakes = BrakeForces::default();
    }
}

fn is_sane(value: f64) -> bool {
    value.is_finite() && value.abs() < COMMAND_SANITY_BOUND
}
