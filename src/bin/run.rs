use bevy::{log::LogPlugin, prelude::*};
use nalgebra::Vector3;
use std::env;

use drone_sim::{
    components::{
        ActuatorOutput, ControlState, Crashed, DroneConfig, FlightState, Stage, StageCommand,
        TelemetrySnapshot,
    },
    plugins::{drone_bundle, DronePlugin},
    resources::SimulationConfig,
    utils::SimError,
};

const DEFAULT_TICKS: usize = 1000;
const CRUISE_ALTITUDE: f64 = 150.0;
const CRUISE_SPEED: f64 = 40.0;

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> Result<T, SimError>
where
    T::Err: std::fmt::Display,
{
    match args.get(index) {
        Some(value) => value
            .parse()
            .map_err(|e| SimError::InvalidArgument(format!("argument {index} ({value}): {e}"))),
        None => Ok(default),
    }
}

/// Airborne stages start in level flight, the rest on the runway.
fn initial_state(config: &DroneConfig, stage: Stage) -> FlightState {
    match stage {
        Stage::Fly | Stage::Land => {
            FlightState::in_level_flight(Vector3::new(0.0, CRUISE_ALTITUDE, 0.0), 0.0, CRUISE_SPEED)
        }
        _ => {
            let gear = &config.wheels.front;
            let height = -gear.position.y + gear.radius - 0.05;
            FlightState::at_position(Vector3::new(0.0, height, 0.0), 0.0)
        }
    }
}

fn main() -> Result<(), SimError> {
    let args: Vec<String> = env::args().collect();

    let config = match args.get(1).map(String::as_str) {
        Some(path) if path != "-" => DroneConfig::from_yaml_file(path)?,
        _ => DroneConfig::default(),
    };
    config.validate()?;
    let stage: Stage = parse_arg(&args, 2, Stage::Taxi)?;
    let speed_factor: f64 = parse_arg(&args, 3, 0.5)?;
    let ticks: usize = parse_arg(&args, 4, DEFAULT_TICKS)?;

    let mut sim = SimulationConfig::default();
    sim.phone.enabled = stage == Stage::Phone;

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default(), DronePlugin::new(sim)));
    app.finish();
    app.cleanup();
    app.update();

    let state = initial_state(&config, stage);
    let entity = app.world_mut().spawn(drone_bundle(config, state)).id();
    app.world_mut()
        .entity_mut(entity)
        .insert(StageCommand::new(stage, speed_factor));

    info!("Running {stage:?} at speed factor {speed_factor} for {ticks} ticks");
    for tick in 0..ticks {
        app.world_mut().run_schedule(FixedUpdate);
        if app.world().get::<Crashed>(entity).is_some() {
            warn!("Stopped after {} ticks", tick + 1);
            break;
        }
    }

    let world = app.world();
    let name = world.get::<Name>(entity).map_or("drone", |name| name.as_str());
    let (Some(state), Some(control), Some(outputs)) = (
        world.get::<FlightState>(entity),
        world.get::<ControlState>(entity),
        world.get::<ActuatorOutput>(entity),
    ) else {
        return Err(SimError::InvalidArgument("drone entity vanished".to_string()));
    };
    let crashed = world
        .get::<Crashed>(entity)
        .map(|crashed| crashed.0.to_string());

    let snapshot = TelemetrySnapshot::capture(name, state, control, outputs, crashed);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
