use drone_sim::components::{FlightState, Stage, StageCommand, WheelPosition};
use drone_sim::systems::{AirframePoint, CrashError};
use nalgebra::Vector3;

use crate::common::{
    assert_resting, cruising_state, resting_state, sunken_state, test_drone_config,
    TestAppBuilder,
};

#[test]
fn test_ground_penetration_marks_the_drone() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("buried"), sunken_state())
        .build();
    let drone = app.drone("buried").unwrap();

    app.run_steps(1);

    assert!(app.is_crashed(drone));
    let events = app.crash_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].entity, drone);
    assert!(matches!(
        events[0].reason,
        CrashError::GroundPenetration {
            part: AirframePoint::Wheel(WheelPosition::Front),
            ..
        }
    ));

    // Last valid state is kept and the drone is no longer simulated
    let before = app.component::<FlightState>(drone).unwrap().clone();
    assert_eq!(before, sunken_state());
    app.run_steps(10);
    assert_eq!(app.component::<FlightState>(drone).unwrap(), &before);
    assert_eq!(app.crash_events().len(), 1);
}

#[test]
fn test_drones_are_independent() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("buried"), sunken_state())
        .with_drone(test_drone_config("parked"), resting_state())
        .build();
    let buried = app.drone("buried").unwrap();
    let parked = app.drone("parked").unwrap();
    app.command(parked, StageCommand::new(Stage::Free, 0.0));

    app.run_steps(50);

    assert!(app.is_crashed(buried));
    assert!(!app.is_crashed(parked));
    assert_resting(app.component::<FlightState>(parked).unwrap());
}

#[test]
fn test_stall_is_reported_as_crash() {
    // Dropping flat: the wings see a vertical airflow
    let falling = FlightState {
        velocity: Vector3::new(0.0, -30.0, 0.0),
        ..cruising_state(300.0, 0.0)
    };
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("stalled"), falling)
        .build();
    let drone = app.drone("stalled").unwrap();

    app.run_steps(1);

    assert!(app.is_crashed(drone));
    assert!(matches!(
        app.crash_events()[0].reason,
        CrashError::AerodynamicLimitExceeded { .. }
    ));
}
