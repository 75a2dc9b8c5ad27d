use bevy::prelude::*;
use nalgebra::{Matrix3, Rotation3, Translation3, Vector3};

use crate::components::{
    ActuatorOutput, CrashEvent, Crashed, DroneConfig, FlightState, Wheels,
};
use crate::resources::{LoggingConfig, SimulationConfig};
use crate::systems::aerodynamics::{checked_lift_force, Surface};
use crate::systems::frames::{
    body_to_world, forward_axis, orientation_from_axes, right_axis, transform_vector,
    world_to_body,
};
use crate::systems::ground::{check_ground_penetration, wheel_contact, ContactFrame, WheelContact};
use crate::systems::physics::CrashError;
use crate::utils::{original_plus_counter, REST_SPEED_SQUARED};

/// System advancing every drone that has not crashed by one fixed step.
///
/// A crash leaves the last valid state in place, tags the drone with
/// [`Crashed`] and emits a [`CrashEvent`].
pub fn physics_integrator_system(
    mut commands: Commands,
    mut query: Query<
        (
            Entity,
            &Name,
            &DroneConfig,
            &mut FlightState,
            &mut Wheels,
            &ActuatorOutput,
        ),
        Without<Crashed>,
    >,
    sim: Res<SimulationConfig>,
    mut crashes: EventWriter<CrashEvent>,
) {
    let dt = sim.time_step;

    for (entity, name, config, mut state, mut wheels, outputs) in query.iter_mut() {
        if let Err(reason) = integrate(config, &mut state, &mut wheels, outputs, dt, &sim.logging) {
            error!("{name} crashed: {reason}");
            commands.entity(entity).insert(Crashed(reason.clone()));
            crashes.send(CrashEvent { entity, reason });
        }
    }
}

/// Force and moment pair, body frame.
#[derive(Debug, Clone, Copy, Default)]
struct Loads {
    force: Vector3<f64>,
    moment: Vector3<f64>,
}

impl Loads {
    fn add(&mut self, force: Vector3<f64>, at: &Vector3<f64>) {
        self.force += force;
        self.moment += at.cross(&force);
    }
}

/// Lift on the four surfaces, gravity and thrust.
fn air_loads(
    config: &DroneConfig,
    outputs: &ActuatorOutput,
    to_body: &nalgebra::Matrix4<f64>,
    velocity: &Vector3<f64>,
    angular_velocity: &Vector3<f64>,
) -> Result<Loads, CrashError> {
    let tail = config.tail_position();
    let surfaces = [
        (
            Surface::LeftWing,
            config.left_wing_position(),
            outputs.left_wing_inclination,
            config.wing_lift_slope,
        ),
        (
            Surface::RightWing,
            config.right_wing_position(),
            outputs.right_wing_inclination,
            config.wing_lift_slope,
        ),
        (
            Surface::HorizontalStabilizer,
            tail,
            outputs.horizontal_stabilizer_inclination,
            config.horizontal_stab_lift_slope,
        ),
        (
            Surface::VerticalStabilizer,
            tail,
            outputs.vertical_stabilizer_inclination,
            config.vertical_stab_lift_slope,
        ),
    ];

    let mut loads = Loads::default();
    for (surface, at, inclination, slope) in surfaces {
        let airspeed = velocity + angular_velocity.cross(&at);
        let lift = checked_lift_force(
            surface,
            &airspeed,
            inclination,
            slope,
            config.max_aoa,
            config.stall_lift_threshold(),
        )?;
        loads.add(lift, &at);
    }

    let gravity = transform_vector(to_body, &Vector3::new(0.0, -config.weight(), 0.0));
    loads.force += gravity;
    loads.force += Vector3::new(0.0, 0.0, -outputs.thrust.clamp(0.0, config.max_thrust));

    Ok(loads)
}

/// Advance `state` and `wheels` by `dt` under the given actuator outputs.
///
/// On `Err` neither `state` nor `wheels` is modified.
pub fn integrate(
    config: &DroneConfig,
    state: &mut FlightState,
    wheels: &mut Wheels,
    outputs: &ActuatorOutput,
    dt: f64,
    logging: &LoggingConfig,
) -> Result<(), CrashError> {
    if !(dt.is_finite() && dt > 0.0) {
        debug!("Skipping integration step with dt = {dt}");
        return Ok(());
    }

    let mass = config.total_mass();
    let to_world = body_to_world(state.heading, state.pitch, state.roll);
    let to_body = world_to_body(state.heading, state.pitch, state.roll);
    let velocity_body = transform_vector(&to_body, &state.velocity);
    let angular_velocity_body = transform_vector(&to_body, &state.angular_velocity);

    let air = air_loads(config, outputs, &to_body, &velocity_body, &angular_velocity_body)?;

    let mut next_wheels = wheels.clone();
    next_wheels.front.set_brake(outputs.front_brake);
    next_wheels.left.set_brake(outputs.left_brake);
    next_wheels.right.set_brake(outputs.right_brake);

    let frame = ContactFrame {
        position: &state.position,
        to_world: &to_world,
        to_body: &to_body,
        velocity: &velocity_body,
        angular_velocity: &angular_velocity_body,
        dt,
    };
    let contacts: Vec<WheelContact> = next_wheels
        .iter()
        .map(|wheel| wheel_contact(wheel, wheel.brake(), &frame))
        .collect();

    let mut ground = Loads::default();
    for (wheel, contact) in next_wheels.iter_mut().zip(&contacts) {
        wheel.compression = contact.compression;
        wheel.pressed = contact.pressed;
        ground.force += contact.force;
        ground.moment += contact.moment;
    }

    // Linear: the ground may stop motion along an axis but never reverse it
    let air_dv = transform_vector(&to_world, &air.force) / mass * dt;
    let ground_dv = transform_vector(&to_world, &ground.force) / mass * dt;
    let original = state.velocity + air_dv;
    let velocity = Vector3::new(
        original_plus_counter(original.x, ground_dv.x),
        original_plus_counter(original.y, ground_dv.y),
        original_plus_counter(original.z, ground_dv.z),
    );

    // Angular, Euler's equations in the body frame. Wheels may stop pitch and
    // roll but never start them; yaw from differential braking steers.
    let inertia = config.inertia();
    let inertia_inv = config.inertia_inv();
    let moment = air.moment + ground.moment;
    let gyroscopic = angular_velocity_body.cross(&(inertia * angular_velocity_body));
    let air_dw = inertia_inv * (air.moment - gyroscopic) * dt;
    let ground_dw = inertia_inv * ground.moment * dt;
    let original = angular_velocity_body + air_dw;
    let angular_velocity_body = Vector3::new(
        original_plus_counter(original.x, ground_dw.x),
        original.y + ground_dw.y,
        original_plus_counter(original.z, ground_dw.z),
    );
    let angular_velocity = if velocity.norm_squared() < REST_SPEED_SQUARED {
        Vector3::zeros()
    } else {
        transform_vector(&to_world, &angular_velocity_body)
    };

    // Orientation is re-derived from the rotated body axes
    let displacement = (state.angular_velocity + angular_velocity) / 2.0 * dt;
    let turn: Matrix3<f64> = Rotation3::new(displacement).into_inner();
    let forward = turn * transform_vector(&to_world, &forward_axis());
    let right = turn * transform_vector(&to_world, &right_axis());
    let (heading, pitch, roll) = orientation_from_axes(&forward, &right, state.heading);

    let position = state.position + (state.velocity + velocity) / 2.0 * dt;

    let placement =
        Translation3::from(position).to_homogeneous() * body_to_world(heading, pitch, roll);
    check_ground_penetration(config, &next_wheels, &placement)?;

    if logging.verbose_physics {
        info!(
            "air force {:?} ground force {:?} moment {:?} -> position {:?} velocity {:?}",
            air.force, ground.force, moment, position, velocity
        );
    }

    state.position = position;
    state.velocity = velocity;
    state.angular_velocity = angular_velocity;
    state.heading = heading;
    state.pitch = pitch;
    state.roll = roll;
    state.elapsed = dt;
    *wheels = next_wheels;

    Ok(())
}
