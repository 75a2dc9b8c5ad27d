use drone_sim::components::{ControlState, FlightState, Stage, StageCommand, Wheels};

use crate::common::{assert_flight_state_valid, cruising_state, test_drone_config, TestAppBuilder};

#[test]
fn test_fly_holds_the_drone_aloft() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("cruiser"), cruising_state(150.0, 40.0))
        .build();
    let drone = app.drone("cruiser").unwrap();
    app.command(drone, StageCommand::new(Stage::Fly, 0.5));

    app.run_steps(200);

    assert!(!app.is_crashed(drone), "{:?}", app.crash_events());
    let state = app.component::<FlightState>(drone).unwrap();
    assert_flight_state_valid(state);
    assert!(state.position.y > 100.0, "altitude {}", state.position.y);
    assert!(state.speed_squared() > 1600.0);
    assert!(!app.component::<Wheels>(drone).unwrap().any_pressed());

    let control = app.component::<ControlState>(drone).unwrap();
    assert_eq!(control.requested_speed_squared, 2100.0);
    assert!(control.thrust > 0.0);
}

#[test]
fn test_fly_requests_are_applied_on_the_next_tick() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("cruiser"), cruising_state(150.0, 40.0))
        .build();
    let drone = app.drone("cruiser").unwrap();
    app.command(
        drone,
        StageCommand::new(Stage::Fly, 0.2)
            .with_pitch(0.05)
            .with_heading(12.0),
    );

    app.run_steps(1);

    let control = app.component::<ControlState>(drone).unwrap();
    assert_eq!(control.requested_pitch, 0.05);
    // Outside the sanity bound: the initial heading is kept
    assert_eq!(control.requested_heading, 0.0);
}

#[test]
fn test_turning_does_not_wind_up_the_pitch() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("turner"), cruising_state(150.0, 40.0))
        .build();
    let drone = app.drone("turner").unwrap();
    app.command(
        drone,
        StageCommand::new(Stage::Fly, 0.5)
            .with_pitch(0.0)
            .with_heading(1.0),
    );

    app.run_steps(3000);

    assert!(!app.is_crashed(drone), "{:?}", app.crash_events());
    let control = app.component::<ControlState>(drone).unwrap();
    assert_eq!(control.commanded_pitch, 0.0);
    if control.fly_override.is_none() {
        assert_eq!(control.requested_pitch, 0.0);
    }
    let state = app.component::<FlightState>(drone).unwrap();
    assert!(state.position.y < 300.0, "altitude {}", state.position.y);
}

#[test]
fn test_land_from_the_approach_comes_to_rest() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("lander"), cruising_state(60.0, 40.0))
        .build();
    let drone = app.drone("lander").unwrap();
    app.command(drone, StageCommand::new(Stage::Land, 0.0));

    app.run_steps(6000);

    assert!(!app.is_crashed(drone), "{:?}", app.crash_events());
    let state = app.component::<FlightState>(drone).unwrap();
    assert_flight_state_valid(state);
    assert!(state.speed_squared() < 1.0, "speed^2 {}", state.speed_squared());
    assert!(app.component::<Wheels>(drone).unwrap().any_pressed());

    let control = app.component::<ControlState>(drone).unwrap();
    assert_eq!(control.thrust, 0.0);
    assert_eq!(control.brakes.front, 500.0);
}
