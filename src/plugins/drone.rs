use bevy::prelude::*;

use crate::components::{
    ActuatorOutput, ControlState, CrashEvent, DroneConfig, FlightState, StageCommand, Wheels,
};
use crate::resources::{PhoneLink, SimulationConfig};
use crate::systems::frames::body_to_world;
use crate::systems::ground::wheel_height;
use crate::systems::{autopilot_system, physics_integrator_system, UdpPhoneLink};

/// Per-tick ordering: the control law feeds the integrator.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum DroneSimSet {
    Control,
    Integration,
}

/// Drone simulation: autopilot and rigid-body integration on the fixed
/// schedule, plus the optional PHONE link.
pub struct DronePlugin {
    config: SimulationConfig,
    drones: Vec<(DroneConfig, FlightState)>,
}

impl DronePlugin {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            drones: Vec::new(),
        }
    }

    /// Spawn a drone at startup.
    pub fn with_drone(mut self, config: DroneConfig, state: FlightState) -> Self {
        self.drones.push((config, state));
        self
    }

    fn setup_drones(mut commands: Commands, drones: Vec<(DroneConfig, FlightState)>) {
        for (config, state) in drones {
            spawn_drone(&mut commands, config, state);
        }
    }
}

impl Plugin for DronePlugin {
    fn build(&self, app: &mut App) {
        let drones = self.drones.clone();

        app.insert_resource(self.config.clone())
            .init_resource::<PhoneLink>()
            .add_event::<CrashEvent>()
            .configure_sets(
                FixedUpdate,
                (DroneSimSet::Control, DroneSimSet::Integration).chain(),
            )
            .add_systems(
                Startup,
                (
                    open_phone_link,
                    move |commands: Commands| Self::setup_drones(commands, drones.clone()),
                ),
            )
            .add_systems(
                FixedUpdate,
                (
                    autopilot_system.in_set(DroneSimSet::Control),
                    physics_integrator_system.in_set(DroneSimSet::Integration),
                ),
            );

        app.init_resource::<Time<Fixed>>()
            .insert_resource(Time::<Fixed>::from_seconds(self.config.time_step));
    }
}

/// Wheels with compression matching the initial pose, so a drone placed on
/// the ground starts settled.
pub fn settled_wheels(config: &DroneConfig, state: &FlightState) -> Wheels {
    let to_world = body_to_world(state.heading, state.pitch, state.roll);
    let mut wheels = Wheels::from_config(config);
    for wheel in wheels.iter_mut() {
        let height = wheel_height(wheel, &state.position, &to_world);
        wheel.compression = (wheel.radius - height).max(0.0);
        wheel.pressed = height < wheel.radius;
    }
    wheels
}

/// All components of one drone, starting in FREE.
pub fn drone_bundle(
    config: DroneConfig,
    state: FlightState,
) -> (
    Name,
    DroneConfig,
    FlightState,
    Wheels,
    ControlState,
    StageCommand,
    ActuatorOutput,
) {
    let wheels = settled_wheels(&config, &state);
    let control = ControlState::new(state.heading);
    (
        Name::new(config.name.clone()),
        config,
        state,
        wheels,
        control,
        StageCommand::default(),
        ActuatorOutput::default(),
    )
}

pub fn spawn_drone(commands: &mut Commands, config: DroneConfig, state: FlightState) -> Entity {
    info!("Spawning drone {} at {:?}", config.name, state.position);
    commands.spawn(drone_bundle(config, state)).id()
}

/// Bind the PHONE socket when enabled. A failed bind leaves the link
/// disconnected and PHONE then behaves as if no datagram ever arrived.
pub fn open_phone_link(sim: Res<SimulationConfig>, mut link: ResMut<PhoneLink>) {
    if !sim.phone.enabled {
        return;
    }
    match UdpPhoneLink::bind(&sim.phone) {
        Ok(socket) => *link = PhoneLink::new(Box::new(socket)),
        Err(e) => warn!("PHONE link unavailable: {e}"),
    }
}
