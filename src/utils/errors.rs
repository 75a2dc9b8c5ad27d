use std::io;
use thiserror::Error;

use crate::components::ConfigError;
use crate::systems::{CrashError, PhoneError};

/// Failures the runner and other top-level callers can surface.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crash: {0}")]
    Crash(#[from] CrashError),

    #[error("Phone link error: {0}")]
    Phone(#[from] PhoneError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Raised by the bisection root finder. The autopilot always recovers from it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("no sign change in [{lo}, {hi}] (f(lo) = {f_lo}, f(hi) = {f_hi})")]
    RootNotFound { lo: f64, hi: f64, f_lo: f64, f_hi: f64 },
}
