use bevy::prelude::*;
use std::f64::consts::PI;

use super::fly_rules::{apply_pitch_rules, FlyConditions, FLY_PITCH_RULES};
use super::solvers::FlightSolver;
use crate::components::{BrakeForces, ControlState, Stage};
use crate::utils::{
    wrap_angle, DEFAULT_MAX_ROLL, FLY_MAX_SPEED_SQUARED, FLY_MIN_SPEED_SQUARED,
    FREE_REAR_BRAKE_SPEED_SQUARED, MAX_FLY_PITCH, TAKE_OFF_CLIMB_FRACTION,
    TAKE_OFF_ROTATE_FRACTION, TAKE_OFF_SPEED_SQUARED, TAXI_HEADING_TOLERANCE,
    TAXI_MIN_SPEED_FACTOR, TAXI_SPEED_SQUARED_PER_FACTOR, TAXI_TURN_BRAKE_GAIN, WIDE_MAX_ROLL,
    WIDE_ROLL_MAX_PITCH, WIDE_ROLL_MIN_ALTITUDE,
};

/// LAND profile: above `floor` metres fly at `pitch` and `speed_squared`.
/// Below the last floor the drone flares level until the gear touches, then
/// rolls out on full brakes.
struct LandBand {
    floor: f64,
    pitch: f64,
    speed_squared: f64,
}

const LAND_BANDS: [LandBand; 5] = [
    LandBand {
        floor: 50.0,
        pitch: -PI / 18.0,
        speed_squared: 2000.0,
    },
    LandBand {
        floor: 20.0,
        pitch: -PI / 36.0,
        speed_squared: 1800.0,
    },
    LandBand {
        floor: 15.0,
        pitch: -PI / 60.0,
        speed_squared: 1700.0,
    },
    LandBand {
        floor: 5.0,
        pitch: -PI / 90.0,
        speed_squared: 1600.0,
    },
    LandBand {
        floor: 4.8,
        pitch: -PI / 180.0,
        speed_squared: 1500.0,
    },
];

/// Run the handler for `stage`. PHONE resolves to the stage it last decoded.
pub fn run_stage(stage: Stage, solver: &FlightSolver, control: &mut ControlState) {
    match stage {
        Stage::Free => free(solver, control),
        Stage::Taxi => taxi(solver, control),
        Stage::TakeOff => take_off(solver, control),
        Stage::Land => land(solver, control),
        Stage::Fly => fly(solver, control),
        Stage::Phone => match control.phone_stage {
            Stage::Phone => free(solver, control),
            delegated => run_stage(delegated, solver, control),
        },
    }
}

/// Inclination, roll and thrust solves shared by the airborne stages.
fn airborne(solver: &FlightSolver, control: &mut ControlState) {
    let zero = solver.solve_zero_vertical(control.requested_pitch);
    let shaped = solver.adjust_for_pitch(zero, control.requested_pitch);
    let (average, limited) = solver.guard_max_aoa(shaped);
    let differential = solver.solve_differential(control, average);
    let (left, right) = solver.split(average, differential);

    control.average_inclination = average;
    control.differential_inclination = differential;
    control.left_inclination = left;
    control.right_inclination = right;
    control.max_aoa_reached = limited;
    control.thrust = solver.solve_thrust(left, right, control.requested_speed_squared);
    control.brakes = BrakeForces::default();
}

fn free(solver: &FlightSolver, control: &mut ControlState) {
    let max_brake = solver.config().max_brake;
    control.reset_outputs();
    control.requested_speed_squared = 0.0;
    let rear = if solver.speed_squared() > FREE_REAR_BRAKE_SPEED_SQUARED {
        max_brake
    } else {
        0.0
    };
    control.brakes = BrakeForces {
        front: max_brake,
        left: rear,
        right: rear,
    };
}

fn taxi(solver: &FlightSolver, control: &mut ControlState) {
    let max_brake = solver.config().max_brake;
    let speed_squared = solver.speed_squared();
    control.reset_outputs();

    let requested = if control.speed_factor < TAXI_MIN_SPEED_FACTOR {
        0.0
    } else {
        TAXI_SPEED_SQUARED_PER_FACTOR * control.speed_factor
    };
    control.requested_speed_squared = requested;

    let brake = if requested <= 0.0 {
        if speed_squared > 0.0 {
            max_brake
        } else {
            0.0
        }
    } else {
        (max_brake * (speed_squared - requested) / requested).clamp(0.0, max_brake)
    };
    let mut brakes = BrakeForces::all(brake);

    let heading_error = wrap_angle(control.requested_heading - solver.sensed().heading);
    if heading_error.abs() > TAXI_HEADING_TOLERANCE {
        let turn = (heading_error.abs() * speed_squared.sqrt() * TAXI_TURN_BRAKE_GAIN)
            .clamp(0.0, 1.0)
            * max_brake;
        // Braking the inner wheel yaws towards it
        if heading_error > 0.0 {
            brakes.left = (brakes.left + turn).min(max_brake);
        } else {
            brakes.right = (brakes.right + turn).min(max_brake);
        }
    }
    control.brakes = brakes;

    if speed_squared < requested {
        control.thrust = solver.solve_thrust(0.0, 0.0, requested);
    }
}

fn take_off(solver: &FlightSolver, control: &mut ControlState) {
    control.requested_heading = solver.sensed().heading;
    control.requested_speed_squared = TAKE_OFF_SPEED_SQUARED;
    control.max_roll = DEFAULT_MAX_ROLL;

    let fraction = solver.speed_squared() / TAKE_OFF_SPEED_SQUARED;
    control.requested_pitch = if fraction < TAKE_OFF_ROTATE_FRACTION {
        0.0
    } else if fraction < TAKE_OFF_CLIMB_FRACTION {
        PI / 36.0
    } else {
        PI / 18.0
    };

    airborne(solver, control);
}

fn land(solver: &FlightSolver, control: &mut ControlState) {
    let altitude = solver.sensed().altitude();
    match LAND_BANDS.iter().find(|band| altitude > band.floor) {
        Some(band) => {
            control.requested_pitch = band.pitch;
            control.requested_speed_squared = band.speed_squared;
            airborne(solver, control);
        }
        None => {
            control.requested_pitch = 0.0;
            control.requested_speed_squared = 0.0;
            if solver.gear_clearance() > 0.0 {
                airborne(solver, control);
            } else {
                control.reset_outputs();
            }
            control.thrust = 0.0;
            control.brakes = BrakeForces::all(solver.config().max_brake);
        }
    }
}

fn fly(solver: &FlightSolver, control: &mut ControlState) {
    let sensed = solver.sensed();
    control.requested_speed_squared = FLY_MIN_SPEED_SQUARED
        + control.speed_factor * (FLY_MAX_SPEED_SQUARED - FLY_MIN_SPEED_SQUARED);
    control.max_roll = if sensed.altitude() > WIDE_ROLL_MIN_ALTITUDE
        && sensed.pitch.abs() < WIDE_ROLL_MAX_PITCH
    {
        WIDE_MAX_ROLL
    } else {
        DEFAULT_MAX_ROLL
    };

    let conditions = FlyConditions {
        altitude: sensed.altitude(),
        vertical_speed: solver.velocity().y,
        speed_squared: solver.speed_squared(),
        requested_speed_squared: control.requested_speed_squared,
        roll: sensed.roll,
        max_roll: control.max_roll,
    };
    let (pitch, rule) = apply_pitch_rules(&FLY_PITCH_RULES, &conditions, control.commanded_pitch);
    if let Some(rule) = rule {
        debug!("FLY override {rule:?}: pitch {} -> {pitch}", control.commanded_pitch);
    }
    control.requested_pitch = pitch.clamp(-MAX_FLY_PITCH, MAX_FLY_PITCH);
    control.fly_override = rule;

    airborne(solver, control);
}
