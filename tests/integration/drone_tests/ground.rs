use approx::assert_relative_eq;
use drone_sim::components::{
    ControlState, FlightState, Stage, StageCommand, Wheels,
};

use crate::common::{
    assert_flight_state_valid, assert_resting, resting_state, rolling_state, test_drone_config,
    TestAppBuilder, RESTING_HEIGHT,
};

#[test]
fn test_drone_spawns_settled_in_free() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("parked"), resting_state())
        .build();
    let drone = app.drone("parked").expect("drone not spawned");

    let wheels = app.component::<Wheels>(drone).unwrap();
    assert!(wheels.iter().all(|wheel| wheel.pressed));
    assert_eq!(app.component::<ControlState>(drone).unwrap().stage, Stage::Free);
}

#[test]
fn test_parked_drone_stays_put() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("parked"), resting_state())
        .build();
    let drone = app.drone("parked").unwrap();

    app.run_steps(200);

    let state = app.component::<FlightState>(drone).unwrap();
    assert_resting(state);
    assert_relative_eq!(state.position.y, RESTING_HEIGHT, epsilon = 1e-9);
    assert!(!app.is_crashed(drone));
}

#[test]
fn test_taxi_settles_on_requested_speed() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("taxi"), resting_state())
        .build();
    let drone = app.drone("taxi").unwrap();
    app.command(drone, StageCommand::new(Stage::Taxi, 0.5));

    app.run_steps(1000);

    let state = app.component::<FlightState>(drone).unwrap();
    assert_flight_state_valid(state);
    assert!(!app.is_crashed(drone));
    // Requested speed^2 is 100
    let speed_squared = state.speed_squared();
    assert!(speed_squared > 80.0 && speed_squared < 105.0, "speed^2 = {speed_squared}");
    assert!(state.position.z < -30.0);
    assert!(app.component::<Wheels>(drone).unwrap().any_pressed());
}

#[test]
fn test_taxi_zero_speed_factor_stops_the_drone() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("stopping"), rolling_state(5.0))
        .build();
    let drone = app.drone("stopping").unwrap();
    app.command(drone, StageCommand::new(Stage::Taxi, 0.0));

    app.run_steps(150);

    let control = app.component::<ControlState>(drone).unwrap();
    assert_eq!(control.requested_speed_squared, 0.0);
    assert!(!app.is_crashed(drone));
    assert_resting(app.component::<FlightState>(drone).unwrap());
}

#[test]
fn test_land_on_runway_holds_brakes() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("landed"), rolling_state(3.0))
        .build();
    let drone = app.drone("landed").unwrap();
    app.command(drone, StageCommand::new(Stage::Land, 0.0));

    app.run_steps(150);

    let control = app.component::<ControlState>(drone).unwrap();
    assert_eq!(control.thrust, 0.0);
    assert_eq!(control.brakes.front, 500.0);
    assert_eq!(control.brakes.left, 500.0);
    assert_resting(app.component::<FlightState>(drone).unwrap());
}
