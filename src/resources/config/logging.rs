use serde::{Deserialize, Serialize};

/// Per-subsystem verbosity, handed to the autopilot and the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose_autopilot: bool,
    #[serde(default)]
    pub verbose_physics: bool,
}
