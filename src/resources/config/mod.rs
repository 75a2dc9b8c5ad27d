pub mod logging;
pub mod phone;
pub mod simulation;

pub use logging::LoggingConfig;
pub use phone::PhoneLinkConfig;
pub use simulation::SimulationConfig;
