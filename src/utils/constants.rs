use std::f64::consts::PI;

pub const GRAVITY: f64 = 9.81; // m/s^2

pub const DEFAULT_TIMESTEP: f64 = 1.0 / 100.0; // s
pub const MAX_TIMESTEP: f64 = 1.0 / 10.0; // Longest tick the integrator accepts
pub const MIN_TIMESTEP: f64 = 1.0 / 10_000.0;

// Root finding
pub const BISECTION_EPSILON: f64 = 1e-6;
pub const BISECTION_MAX_ITERATIONS: usize = 200;

/// Requested pitch or heading at or above this magnitude (rad) is discarded.
pub const COMMAND_SANITY_BOUND: f64 = 10.0;

// Lateral control
pub const DEFAULT_MAX_ROLL: f64 = PI / 6.0;
pub const WIDE_MAX_ROLL: f64 = PI / 4.0;
pub const WIDE_ROLL_MIN_ALTITUDE: f64 = 100.0; // m
pub const WIDE_ROLL_MAX_PITCH: f64 = PI / 18.0;
pub const MAX_ROLL_RATE: f64 = 0.5; // rad/s
pub const MAX_ADJUST_INCLINATION: f64 = PI / 90.0;

// Longitudinal control
pub const PITCH_SHAPING_SCALE: f64 = PI / 60.0;
pub const THRUST_SPEED_GAIN: f64 = 3.0;
pub const AOA_GUARD_STEP: f64 = 0.01;
pub const AOA_GUARD_MARGIN: f64 = 0.99;
pub const SPLIT_MAX_PERTURBATION: f64 = 0.25;
pub const MAX_FLY_PITCH: f64 = PI / 9.0;

// Ground handling
pub const FREE_REAR_BRAKE_SPEED_SQUARED: f64 = 10.0;
pub const TAXI_MIN_SPEED_FACTOR: f64 = 0.2;
pub const TAXI_SPEED_SQUARED_PER_FACTOR: f64 = 200.0;
pub const TAXI_HEADING_TOLERANCE: f64 = 0.01;
pub const TAXI_TURN_BRAKE_GAIN: f64 = 0.5;

// Take-off and cruise
pub const TAKE_OFF_SPEED_SQUARED: f64 = 1500.0;
pub const TAKE_OFF_ROTATE_FRACTION: f64 = 0.5;
pub const TAKE_OFF_CLIMB_FRACTION: f64 = 0.8;
pub const FLY_MIN_SPEED_SQUARED: f64 = 1200.0;
pub const FLY_MAX_SPEED_SQUARED: f64 = 3000.0;

/// Below this linear speed squared the airframe is treated as resting.
pub const REST_SPEED_SQUARED: f64 = 0.1;

/// Default fraction of the weight an over-limit surface must lift to stall.
pub const STALL_LIFT_RATIO: f64 = 0.05;

// FLY pitch overrides
pub const ANTI_CRASH_ALTITUDE: f64 = 10.0; // m
pub const ANTI_CRASH_SINK_RATE: f64 = -2.0; // m/s
pub const ANTI_CRASH_PITCH: f64 = PI / 18.0;
pub const LOW_ALTITUDE: f64 = 25.0; // m
pub const LOW_ALTITUDE_MIN_PITCH: f64 = PI / 36.0;
pub const OVERSPEED_RATIO: f64 = 1.5;
pub const OVERSPEED_MIN_PITCH: f64 = PI / 60.0;
pub const BANK_COMPENSATION_ROLL: f64 = PI / 12.0;
pub const BANK_COMPENSATION_PITCH: f64 = PI / 180.0;

// PHONE link
pub const PHONE_DEFAULT_PORT: u16 = 4210;
pub const PHONE_DEFAULT_TIMEOUT_MS: u64 = 5;
pub const PHONE_DATAGRAM_LEN: usize = 10;
