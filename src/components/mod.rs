pub mod drone;
mod termination;

pub use drone::{
    ActuatorOutput, BrakeForces, ConfigError, ControlState, DroneConfig, FlightState, FlyOverride,
    SensedState, Stage, StageCommand, TelemetrySnapshot, UndercarriageConfig, WheelPosition,
    WheelSpec, WheelState, Wheels,
};
pub use termination::{CrashEvent, Crashed};
