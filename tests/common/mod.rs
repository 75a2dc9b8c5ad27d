#![allow(dead_code)]

mod assertions;
mod fixtures;
mod helpers;
mod test_app;

// Re-export
pub use assertions::{assert_flight_state_valid, assert_resting};
pub use fixtures::*;
pub use helpers::*;
pub use test_app::{TestApp, TestAppBuilder};
