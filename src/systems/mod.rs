pub mod aerodynamics;
pub mod autopilot;
pub mod frames;
pub mod ground;
pub mod phone;
pub mod physics;

pub use autopilot::{autopilot_system, update as autopilot_update, FlightSolver};
pub use phone::{poll_command, DatagramSource, PhoneCommand, PhoneError, UdpPhoneLink};
pub use physics::{integrate, physics_integrator_system, AirframePoint, CrashError};
