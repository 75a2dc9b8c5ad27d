use drone_sim::components::{DroneConfig, FlightState};
use nalgebra::Vector3;

/// Height of the centre of mass with the default gear compressed by 5 cm.
pub const RESTING_HEIGHT: f64 = 1.15;

pub fn test_drone_config(name: &str) -> DroneConfig {
    DroneConfig {
        name: name.to_string(),
        ..Default::default()
    }
}

/// Parked on the runway, nose along -Z.
pub fn resting_state() -> FlightState {
    FlightState::at_position(Vector3::new(0.0, RESTING_HEIGHT, 0.0), 0.0)
}

/// On the runway, rolling forward at `speed`.
pub fn rolling_state(speed: f64) -> FlightState {
    FlightState::in_level_flight(Vector3::new(0.0, RESTING_HEIGHT, 0.0), 0.0, speed)
}

pub fn cruising_state(altitude: f64, speed: f64) -> FlightState {
    FlightState::in_level_flight(Vector3::new(0.0, altitude, 0.0), 0.0, speed)
}

/// Gear buried half a metre into the runway.
pub fn sunken_state() -> FlightState {
    FlightState::at_position(Vector3::new(0.0, 0.5, 0.0), 0.0)
}
