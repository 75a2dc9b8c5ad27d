use drone_sim::components::{ControlState, FlightState, Stage, StageCommand};

use crate::common::{assert_resting, rolling_state, test_drone_config, ScriptedSource, TestAppBuilder};

#[test]
fn test_phone_datagram_drives_the_stage() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("remote"), rolling_state(5.0))
        .with_phone_source(Box::new(ScriptedSource::new(&[b"000000000X"])))
        .build();
    let drone = app.drone("remote").unwrap();
    app.command(drone, StageCommand::new(Stage::Phone, 1.0));

    app.run_steps(150);

    let control = app.component::<ControlState>(drone).unwrap();
    assert_eq!(control.stage, Stage::Phone);
    assert_eq!(control.phone_stage, Stage::Taxi);
    assert_eq!(control.speed_factor, 0.0);
    assert!(!app.is_crashed(drone));
    assert_resting(app.component::<FlightState>(drone).unwrap());
}

#[test]
fn test_phone_without_datagrams_idles_in_free() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("remote"), rolling_state(5.0))
        .build();
    let drone = app.drone("remote").unwrap();
    app.command(drone, StageCommand::new(Stage::Phone, 0.0));

    app.run_steps(5);

    let control = app.component::<ControlState>(drone).unwrap();
    assert_eq!(control.phone_stage, Stage::Free);
    assert_eq!(control.thrust, 0.0);
    assert_eq!(control.brakes.front, 500.0);
}

#[test]
fn test_malformed_datagram_is_ignored() {
    let mut app = TestAppBuilder::new()
        .with_drone(test_drone_config("remote"), rolling_state(5.0))
        .with_phone_source(Box::new(ScriptedSource::new(&[b"garbage", b"000000001X"])))
        .build();
    let drone = app.drone("remote").unwrap();
    app.command(drone, StageCommand::new(Stage::Phone, 0.0));

    app.run_steps(1);
    assert_eq!(app.component::<ControlState>(drone).unwrap().phone_stage, Stage::Free);

    app.run_steps(1);
    let control = app.component::<ControlState>(drone).unwrap();
    assert_eq!(control.phone_stage, Stage::Taxi);
    assert_eq!(control.speed_factor, 0.1);
}
