use bevy::prelude::*;
use nalgebra::{Matrix4, Vector3};

use crate::components::{ControlState, DroneConfig, SensedState};
use crate::systems::aerodynamics::{angle_of_attack, lift_force, Surface};
use crate::systems::frames::{body_to_world, transform_vector, world_to_body};
use crate::utils::{
    bisect, wrap_angle, SolverError, AOA_GUARD_MARGIN, AOA_GUARD_STEP, DEFAULT_TIMESTEP,
    MAX_ADJUST_INCLINATION, MAX_ROLL_RATE, PITCH_SHAPING_SCALE, REST_SPEED_SQUARED,
    SPLIT_MAX_PERTURBATION, THRUST_SPEED_GAIN,
};

/// Inverts the lift model for one drone and one tick.
///
/// Holds the sensed attitude plus the velocity and roll rate estimated from
/// consecutive samples. All helpers are pure; stage handlers write the results
/// into [`ControlState`].
#[derive(Debug, Clone)]
pub struct FlightSolver<'a> {
    config: &'a DroneConfig,
    sensed: SensedState,
    velocity: Vector3<f64>,
    roll_rate: f64,
    dt: f64,
}

impl<'a> FlightSolver<'a> {
    pub fn new(
        config: &'a DroneConfig,
        sensed: SensedState,
        velocity: Vector3<f64>,
        roll_rate: f64,
    ) -> Self {
        let dt = if sensed.elapsed > 0.0 {
            sensed.elapsed
        } else {
            DEFAULT_TIMESTEP
        };
        Self {
            config,
            sensed,
            velocity,
            roll_rate,
            dt,
        }
    }

    /// Estimate velocity and roll rate from the previous sample kept in `control`.
    pub fn from_samples(
        config: &'a DroneConfig,
        control: &ControlState,
        sensed: SensedState,
    ) -> Self {
        let elapsed = sensed.elapsed;
        let (velocity, roll_rate) = if elapsed > 0.0 {
            let velocity = control
                .previous_position
                .map_or(Vector3::zeros(), |previous| (sensed.position - previous) / elapsed);
            let roll_rate = control
                .previous_roll
                .map_or(0.0, |previous| wrap_angle(sensed.roll - previous) / elapsed);
            (velocity, roll_rate)
        } else {
            (Vector3::zeros(), 0.0)
        };
        Self::new(config, sensed, velocity, roll_rate)
    }

    pub fn config(&self) -> &DroneConfig {
        self.config
    }

    pub fn sensed(&self) -> &SensedState {
        &self.sensed
    }

    pub fn velocity(&self) -> &Vector3<f64> {
        &self.velocity
    }

    pub fn speed_squared(&self) -> f64 {
        self.velocity.norm_squared()
    }

    /// Height of the lowest tyre above the ground at the sensed pose (m).
    pub fn gear_clearance(&self) -> f64 {
        let to_world = body_to_world(self.sensed.heading, self.sensed.pitch, self.sensed.roll);
        let gear = &self.config.wheels;
        [&gear.front, &gear.left, &gear.right]
            .iter()
            .map(|wheel| {
                self.sensed.position.y + transform_vector(&to_world, &wheel.position).y
                    - wheel.radius
            })
            .fold(f64::INFINITY, f64::min)
    }

    fn to_body(&self, pitch: f64) -> Matrix4<f64> {
        world_to_body(self.sensed.heading, pitch, self.sensed.roll)
    }

    fn surface_lift(&self, surface: Surface, airspeed: &Vector3<f64>, inclination: f64) -> Vector3<f64> {
        let slope = match surface {
            Surface::LeftWing | Surface::RightWing => self.config.wing_lift_slope,
            Surface::HorizontalStabilizer => self.config.horizontal_stab_lift_slope,
            Surface::VerticalStabilizer => self.config.vertical_stab_lift_slope,
        };
        lift_force(
            airspeed,
            &surface.attack_vector(inclination),
            &surface.rotation_axis(),
            slope,
        )
    }

    /// Body-frame force of gravity, both wings and the neutral stabilizers.
    fn body_force(&self, pitch: f64, left: f64, right: f64) -> Vector3<f64> {
        let to_body = self.to_body(pitch);
        let airspeed = transform_vector(&to_body, &self.velocity);
        let gravity = transform_vector(&to_body, &Vector3::new(0.0, -self.config.weight(), 0.0));

        gravity
            + self.surface_lift(Surface::LeftWing, &airspeed, left)
            + self.surface_lift(Surface::RightWing, &airspeed, right)
            + self.surface_lift(Surface::HorizontalStabilizer, &airspeed, 0.0)
            + self.surface_lift(Surface::VerticalStabilizer, &airspeed, 0.0)
    }

    /// Net body-vertical force with both wings at `inclination`, attitude
    /// taken at `pitch`.
    pub fn vertical_force(&self, inclination: f64, pitch: f64) -> f64 {
        self.body_force(pitch, inclination, inclination).y
    }

    fn zero_vertical_at(&self, pitch: f64) -> Result<f64, SolverError> {
        let max_aoa = self.config.max_aoa;
        let residual = |inclination| self.vertical_force(inclination, pitch);
        bisect(residual, 0.0, max_aoa).or_else(|_| bisect(residual, -max_aoa, 0.0))
    }

    /// Average wing inclination that cancels the net vertical force.
    ///
    /// Falls back to a level attitude once, then to zero inclination (free fall).
    pub fn solve_zero_vertical(&self, requested_pitch: f64) -> f64 {
        let solved = self.zero_vertical_at(requested_pitch).or_else(|e| {
            if requested_pitch != 0.0 {
                self.zero_vertical_at(0.0)
            } else {
                Err(e)
            }
        });
        match solved {
            Ok(inclination) => inclination,
            Err(e) => {
                debug!("Free fall, no balancing inclination: {e}");
                0.0
            }
        }
    }

    /// Cubic pitch-error shaping, saturated to `[-1, 1]`.
    pub fn elevation_factor(&self, requested_pitch: f64) -> f64 {
        ((requested_pitch - self.sensed.pitch) / PITCH_SHAPING_SCALE)
            .powi(3)
            .clamp(-1.0, 1.0)
    }

    /// Move the balancing inclination so that the vertical force becomes
    /// `weight * elevation_factor`. Unreachable targets leave it unchanged.
    pub fn adjust_for_pitch(&self, zero: f64, requested_pitch: f64) -> f64 {
        let factor = self.elevation_factor(requested_pitch);
        if factor == 0.0 {
            return zero;
        }
        let target = self.config.weight() * factor;
        let pitch = self.sensed.pitch;
        let max_aoa = self.config.max_aoa;
        let (lo, hi) = if factor > 0.0 {
            (zero, max_aoa)
        } else {
            (-max_aoa, zero)
        };

        bisect(|inclination| self.vertical_force(inclination, pitch) - target, lo, hi)
            .unwrap_or_else(|e| {
                debug!("Pitch correction unreachable: {e}");
                zero
            })
    }

    /// Step the average inclination towards a smaller angle of attack while the
    /// wings sit within 1% of the stall limit. Returns the new inclination and
    /// whether it had to move.
    pub fn guard_max_aoa(&self, average: f64) -> (f64, bool) {
        let max_aoa = self.config.max_aoa;
        // No meaningful angle of attack without airflow
        if self.speed_squared() < REST_SPEED_SQUARED {
            return (average, false);
        }
        let limit = AOA_GUARD_MARGIN * max_aoa;
        let to_body = self.to_body(self.sensed.pitch);
        let anticipated = self.velocity + Vector3::new(0.0, -self.config.gravity * self.dt, 0.0);
        let airspeed = transform_vector(&to_body, &anticipated);
        let aoa = |inclination: f64| {
            let surface = Surface::LeftWing;
            angle_of_attack(
                &airspeed,
                &surface.attack_vector(inclination),
                &surface.rotation_axis(),
            )
        };

        let mut inclination = average.clamp(-max_aoa, max_aoa);
        let mut moved = inclination != average;
        let max_steps = (2.0 * max_aoa / AOA_GUARD_STEP).ceil() as usize + 1;
        for _ in 0..max_steps {
            let current = aoa(inclination);
            if current.abs() <= limit {
                break;
            }
            let next = (inclination - current.signum() * AOA_GUARD_STEP).clamp(-max_aoa, max_aoa);
            if next == inclination {
                break;
            }
            inclination = next;
            moved = true;
        }
        (inclination, moved)
    }

    /// Differential inclination producing the lift split needed to reach the
    /// requested roll rate. Positive values lift the right wing.
    pub fn solve_differential(&self, control: &ControlState, average: f64) -> f64 {
        if self.speed_squared() < REST_SPEED_SQUARED {
            return 0.0;
        }

        let heading_error = wrap_angle(control.requested_heading - self.sensed.heading);
        let requested_roll = heading_error.clamp(-control.max_roll, control.max_roll);
        let requested_rate =
            (requested_roll - self.sensed.roll).clamp(-MAX_ROLL_RATE, MAX_ROLL_RATE);
        let target = 2.0 * self.config.wing_mass * self.config.wing_x
            * (requested_rate - self.roll_rate)
            / self.dt;

        let airspeed = transform_vector(&self.to_body(self.sensed.pitch), &self.velocity);
        let residual = |differential: f64| {
            let right = self.surface_lift(Surface::RightWing, &airspeed, average + differential);
            let left = self.surface_lift(Surface::LeftWing, &airspeed, average - differential);
            right.y - left.y - target
        };

        match bisect(residual, -MAX_ADJUST_INCLINATION, MAX_ADJUST_INCLINATION) {
            Ok(differential) => differential,
            Err(SolverError::RootNotFound { lo, hi, f_lo, f_hi }) => {
                if f_lo.abs() <= f_hi.abs() {
                    lo
                } else {
                    hi
                }
            }
        }
    }

    /// Left and right inclinations realising `differential` without changing
    /// the combined wing lift of `average`.
    pub fn split(&self, average: f64, differential: f64) -> (f64, f64) {
        let bound = SPLIT_MAX_PERTURBATION.min(self.config.max_aoa - average.abs());
        let shared = if bound > 0.0 && differential != 0.0 {
            let airspeed = transform_vector(&self.to_body(self.sensed.pitch), &self.velocity);
            let lift = |surface, inclination| self.surface_lift(surface, &airspeed, inclination).y;
            let balanced = lift(Surface::LeftWing, average) + lift(Surface::RightWing, average);
            bisect(
                |shift| {
                    lift(Surface::LeftWing, average + shift - differential)
                        + lift(Surface::RightWing, average + shift + differential)
                        - balanced
                },
                -bound,
                bound,
            )
            .unwrap_or(0.0)
        } else {
            0.0
        };
        (average + shared - differential, average + shared + differential)
    }

    /// Thrust cancelling the longitudinal force plus a term closing the gap to
    /// the requested speed, clamped to the engine range.
    pub fn solve_thrust(&self, left: f64, right: f64, requested_speed_squared: f64) -> f64 {
        let longitudinal = self.body_force(self.sensed.pitch, left, right).z;
        let correction = (requested_speed_squared - self.speed_squared())
            * self.dt
            * THRUST_SPEED_GAIN
            * self.config.total_mass();
        (longitudinal + correction).clamp(0.0, self.config.max_thrust)
    }
}
