pub mod config;
mod phone_link;

pub use config::{LoggingConfig, PhoneLinkConfig, SimulationConfig};
pub use phone_link::PhoneLink;
