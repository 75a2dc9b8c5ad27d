use bevy::prelude::*;

use crate::systems::CrashError;

/// Marks a drone whose flight ended in a crash. Crashed drones are skipped
/// by the autopilot and the integrator and keep their last valid state.
#[derive(Component, Debug, Clone)]
pub struct Crashed(pub CrashError);

#[derive(Event, Debug, Clone)]
pub struct CrashEvent {
    /// Drone that crashed
    pub entity: Entity,
    /// What went wrong
    pub reason: CrashError,
}
