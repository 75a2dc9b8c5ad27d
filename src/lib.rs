pub mod components;
pub mod plugins;
pub mod resources;
pub mod systems;
pub mod utils;

pub use components::{
    ActuatorOutput, ControlState, DroneConfig, FlightState, SensedState, Stage, StageCommand,
};
pub use plugins::{spawn_drone, DronePlugin};
pub use resources::{LoggingConfig, SimulationConfig};
pub use systems::{integrate, CrashError};
