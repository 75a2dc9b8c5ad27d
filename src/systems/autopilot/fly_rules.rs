use crate::components::FlyOverride;
use crate::utils::{
    ANTI_CRASH_ALTITUDE, ANTI_CRASH_PITCH, ANTI_CRASH_SINK_RATE, BANK_COMPENSATION_PITCH,
    BANK_COMPENSATION_ROLL, LOW_ALTITUDE, LOW_ALTITUDE_MIN_PITCH, OVERSPEED_MIN_PITCH,
    OVERSPEED_RATIO,
};

/// Inputs the FLY pitch overrides are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyConditions {
    pub altitude: f64,
    pub vertical_speed: f64,
    pub speed_squared: f64,
    pub requested_speed_squared: f64,
    pub roll: f64,
    pub max_roll: f64,
}

/// A guarded rewrite of the requested pitch.
pub struct PitchRule {
    pub kind: FlyOverride,
    pub applies: fn(&FlyConditions) -> bool,
    pub effect: fn(f64) -> f64,
}

/// Evaluated in order; the first rule that applies is the only one used.
pub const FLY_PITCH_RULES: [PitchRule; 5] = [
    PitchRule {
        kind: FlyOverride::BankLimit,
        applies: |c| c.roll.abs() > c.max_roll,
        effect: |_| 0.0,
    },
    PitchRule {
        kind: FlyOverride::AntiCrash,
        applies: |c| c.altitude < ANTI_CRASH_ALTITUDE && c.vertical_speed < ANTI_CRASH_SINK_RATE,
        effect: |_| ANTI_CRASH_PITCH,
    },
    PitchRule {
        kind: FlyOverride::LowAltitude,
        applies: |c| c.altitude < LOW_ALTITUDE,
        effect: |pitch| pitch.max(LOW_ALTITUDE_MIN_PITCH),
    },
    PitchRule {
        kind: FlyOverride::Overspeed,
        applies: |c| c.speed_squared > OVERSPEED_RATIO * c.requested_speed_squared,
        effect: |pitch| pitch.max(OVERSPEED_MIN_PITCH),
    },
    PitchRule {
        kind: FlyOverride::BankCompensation,
        applies: |c| c.roll.abs() > BANK_COMPENSATION_ROLL,
        effect: |pitch| pitch + BANK_COMPENSATION_PITCH,
    },
];

/// Apply the first matching rule to `requested_pitch`.
pub fn apply_pitch_rules(
    rules: &[PitchRule],
    conditions: &FlyConditions,
    requested_pitch: f64,
) -> (f64, Option<FlyOverride>) {
    rules
        .iter()
        .find(|rule| (rule.applies)(conditions))
        .map_or((requested_pitch, None), |rule| {
            ((rule.effect)(requested_pitch), Some(rule.kind))
        })
}
