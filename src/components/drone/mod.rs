pub mod actuator;
pub mod config;
pub mod control;
pub mod loader;
pub mod state;
pub mod telemetry;
pub mod wheel;

pub use actuator::ActuatorOutput;
pub use config::{DroneConfig, UndercarriageConfig, WheelSpec};
pub use control::{BrakeForces, ControlState, FlyOverride, Stage, StageCommand};
pub use loader::ConfigError;
pub use state::{FlightState, SensedState};
pub use telemetry::TelemetrySnapshot;
pub use wheel::{WheelPosition, WheelState, Wheels};
