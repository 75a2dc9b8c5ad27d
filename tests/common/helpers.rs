use bevy::prelude::*;
use drone_sim::systems::{DatagramSource, PhoneError};
use std::collections::VecDeque;

use crate::common::TestApp;

/// Fixed-step until `condition` holds or `max_steps` ticks have run.
pub fn wait_for_condition<F>(test_app: &mut TestApp, condition: F, max_steps: usize) -> bool
where
    F: Fn(&mut App) -> bool,
{
    for _ in 0..max_steps {
        if condition(&mut test_app.app) {
            return true;
        }
        test_app.run_steps(1);
    }
    false
}

/// Replays canned datagrams, then reports silence.
pub struct ScriptedSource {
    datagrams: VecDeque<Vec<u8>>,
}

impl ScriptedSource {
    pub fn new(datagrams: &[&[u8]]) -> Self {
        Self {
            datagrams: datagrams.iter().map(|d| d.to_vec()).collect(),
        }
    }
}

impl DatagramSource for ScriptedSource {
    fn receive(&mut self) -> Result<Option<Vec<u8>>, PhoneError> {
        Ok(self.datagrams.pop_front())
    }
}
