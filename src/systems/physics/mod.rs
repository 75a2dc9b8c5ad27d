mod error;
mod integrator;

pub use error::{AirframePoint, CrashError};
pub use integrator::{integrate, physics_integrator_system};
