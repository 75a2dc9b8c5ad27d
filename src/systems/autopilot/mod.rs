//! Per-tick control law: a stage state machine that inverts the lift model
//! to produce wing inclinations, thrust and brake forces.

mod fly_rules;
mod solvers;
mod stages;

pub use fly_rules::{apply_pitch_rules, FlyConditions, PitchRule, FLY_PITCH_RULES};
pub use solvers::FlightSolver;
pub use stages::run_stage;

use bevy::prelude::*;

use crate::components::{
    ActuatorOutput, ControlState, Crashed, DroneConfig, FlightState, SensedState, Stage,
    StageCommand,
};
use crate::resources::{LoggingConfig, PhoneLink, SimulationConfig};
use crate::systems::phone::PhoneCommand;
use crate::utils::wrap_angle;

/// Take over a decoded PHONE datagram. Roll is turned into a heading offset.
fn apply_phone_command(control: &mut ControlState, command: &PhoneCommand, heading: f64) {
    control.phone_stage = command.stage;
    control.speed_factor = command.speed_factor;
    if !control.request_pitch(command.pitch) {
        warn!("Ignoring PHONE pitch {}", command.pitch);
    }
    if !control.request_heading(wrap_angle(heading + command.roll)) {
        warn!("Ignoring PHONE roll {}", command.roll);
    }
}

/// Run one tick of the control law and return the actuator demands.
///
/// `phone` is the datagram read this tick, if any; it is only consulted under
/// [`Stage::Phone`].
pub fn update(
    config: &DroneConfig,
    control: &mut ControlState,
    command: &StageCommand,
    sensed: &SensedState,
    phone: Option<PhoneCommand>,
    logging: &LoggingConfig,
) -> ActuatorOutput {
    control.absorb(command);
    control.fly_override = None;
    control.max_aoa_reached = false;

    if control.stage == Stage::Phone {
        if let Some(datagram) = phone {
            apply_phone_command(control, &datagram, sensed.heading);
        }
    }

    let solver = FlightSolver::from_samples(config, control, *sensed);
    run_stage(control.stage, &solver, control);

    control.previous_position = Some(sensed.position);
    control.previous_roll = Some(sensed.roll);

    let outputs = ActuatorOutput::from(&*control);
    if logging.verbose_autopilot {
        info!(
            "{:?} pitch {:.4}/{:.4} heading {:.4}/{:.4} speed^2 {:.1}/{:.1} -> {:?}",
            control.stage,
            sensed.pitch,
            control.requested_pitch,
            sensed.heading,
            control.requested_heading,
            solver.speed_squared(),
            control.requested_speed_squared,
            outputs
        );
    }
    outputs
}

/// System running the control law for every drone still flying.
pub fn autopilot_system(
    mut query: Query<
        (
            &DroneConfig,
            &FlightState,
            &StageCommand,
            &mut ControlState,
            &mut ActuatorOutput,
        ),
        Without<Crashed>,
    >,
    sim: Res<SimulationConfig>,
    mut phone: ResMut<PhoneLink>,
) {
    for (config, state, command, mut control, mut outputs) in query.iter_mut() {
        let datagram = if command.stage == Stage::Phone {
            phone.poll()
        } else {
            None
        };
        *outputs = update(
            config,
            &mut control,
            command,
            &state.sense(),
            datagram,
            &sim.logging,
        );
    }
}
