use drone_sim::components::FlightState;
use nalgebra::Vector3;

/// Assert that every component of the flight state is finite
#[track_caller]
pub fn assert_flight_state_valid(state: &FlightState) {
    assert!(
        state.position.iter().all(|x| x.is_finite()),
        "Position is not finite: {:?}",
        state.position
    );
    assert!(
        state.velocity.iter().all(|x| x.is_finite()),
        "Velocity is not finite: {:?}",
        state.velocity
    );
    assert!(
        state.angular_velocity.iter().all(|x| x.is_finite()),
        "Angular velocity is not finite: {:?}",
        state.angular_velocity
    );
    assert!(state.heading.is_finite(), "Heading is not finite");
    assert!(state.pitch.is_finite(), "Pitch is not finite");
    assert!(state.roll.is_finite(), "Roll is not finite");
}

/// Assert the drone is not moving
#[track_caller]
pub fn assert_resting(state: &FlightState) {
    assert_flight_state_valid(state);
    assert!(
        state.velocity.norm_squared() < 1e-12,
        "Drone still moving: {:?}",
        state.velocity
    );
    assert_eq!(state.angular_velocity, Vector3::zeros());
}
